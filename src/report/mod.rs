//! Output writing — everything a triage run leaves on disk.
//!
//! Pure presentation: the pipeline's views are rendered and written as
//! they are, never re-sorted or re-classified here.

pub mod csv;
pub mod viz;

use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::error::ReportError;
use crate::pipeline::TriageRun;
use crate::templates;

/// File names written under the output directory.
pub mod files {
    pub const CLASSIFIED: &str = "all_messages_classified.csv";
    pub const TRIAGE_QUEUE: &str = "triage_queue.csv";
    pub const LATEST_THREADS: &str = "latest_threads.csv";
    pub const SUMMARY: &str = "summary_by_category.csv";
    pub const CATEGORY_COUNTS: &str = "category_counts.json";
    pub const TEMPLATES: &str = "response_templates.md";
}

/// Write every output for a completed run into `out_dir`, creating the
/// directory if needed.
pub async fn write_all(out_dir: &Path, run: &TriageRun) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir).await?;

    fs::write(
        out_dir.join(files::CLASSIFIED),
        csv::render_messages(&run.classified),
    )
    .await?;
    fs::write(
        out_dir.join(files::TRIAGE_QUEUE),
        csv::render_messages(&run.queue),
    )
    .await?;
    fs::write(
        out_dir.join(files::LATEST_THREADS),
        csv::render_messages(&run.latest_threads),
    )
    .await?;
    fs::write(
        out_dir.join(files::SUMMARY),
        csv::render_summary(&run.summary),
    )
    .await?;
    fs::write(
        out_dir.join(files::CATEGORY_COUNTS),
        viz::render_category_counts(&run.summary)?,
    )
    .await?;
    fs::write(out_dir.join(files::TEMPLATES), templates::render_markdown()).await?;

    info!(dir = %out_dir.display(), "Run outputs written");
    Ok(())
}
