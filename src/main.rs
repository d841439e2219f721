use inbox_triage::config::TriageConfig;
use inbox_triage::ingest::{CsvSource, MessageSource};
use inbox_triage::pipeline::TriagePipeline;
use inbox_triage::report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = TriageConfig::from_env();

    eprintln!("📨 Inbox Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Inbox:   {}", config.inbox_path.display());
    eprintln!("   Outputs: {}", config.output_dir.display());
    eprintln!();

    let source = CsvSource::new(&config.inbox_path);
    let batch = source.fetch().await?;

    let pipeline = TriagePipeline::new();
    let run = pipeline.run(batch.messages);

    report::write_all(&config.output_dir, &run).await?;

    eprintln!(
        "   Classified: {} messages ({} rows rejected)",
        run.classified.len(),
        batch.rejects.len()
    );
    eprintln!("   Queue:      {} entries", run.queue.len());
    eprintln!("   Threads:    {} (sender, category) pairs", run.latest_threads.len());
    eprintln!("   Categories: {}", run.summary.len());
    eprintln!("\n   Outputs written to {}", config.output_dir.display());

    Ok(())
}
