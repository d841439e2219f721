//! Integration tests for the full triage flow.
//!
//! Each test writes an inbox CSV to a temp directory, loads it through
//! `CsvSource`, runs the real pipeline, and (where relevant) writes the
//! real output files and inspects them.

use chrono::{TimeZone, Utc};

use inbox_triage::ingest::{CsvSource, MessageSource};
use inbox_triage::pipeline::types::{Category, Priority};
use inbox_triage::pipeline::TriagePipeline;
use inbox_triage::report;

const INBOX: &str = "\
sender,subject,body,sent_date
maria@acme.io,URGENT: servers down,our system is completely inaccessible,2025-06-03 09:15:00
li.wei@acme.io,Need help,\"I was charged twice, this is urgent\",2025-06-03 08:40:00
sam@betacorp.com,Question,What are your pricing tiers?,2025-06-01 14:00:00
maria@acme.io,Follow-up,What are your pricing tiers?,2025-06-02 10:00:00
jo@gamma.dev,Refund please!!!,Refund please!!!,2025-06-02 16:20:00
dana@delta.org,refund,refund   please,2025-06-02 17:45:00
broken-row,missing the rest
eve@epsilon.net,Login trouble,unable to log in since this morning,2025-06-03 07:30:00
";

async fn load_and_run(dir: &std::path::Path) -> (inbox_triage::TriageRun, usize) {
    let inbox_path = dir.join("inbox.csv");
    tokio::fs::write(&inbox_path, INBOX).await.unwrap();

    let batch = CsvSource::new(&inbox_path).fetch().await.unwrap();
    let rejects = batch.rejects.len();
    let run = TriagePipeline::new().run(batch.messages);
    (run, rejects)
}

#[tokio::test]
async fn malformed_rows_are_rejected_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let (run, rejects) = load_and_run(dir.path()).await;

    assert_eq!(rejects, 1);
    assert_eq!(run.classified.len(), 7);
}

#[tokio::test]
async fn classification_matches_expected_scenarios() {
    let dir = tempfile::tempdir().unwrap();
    let (run, _) = load_and_run(dir.path()).await;

    let by_sender_subject = |sender: &str, subject: &str| {
        run.classified
            .iter()
            .find(|c| c.message.sender == sender && c.message.subject == subject)
            .unwrap()
    };

    // Outage with urgency keyword: already P1, no escalation below 1.
    let outage = by_sender_subject("maria@acme.io", "URGENT: servers down");
    assert_eq!(outage.category, Category::Outage);
    assert_eq!(outage.priority, Priority::P1);
    assert!(outage.has_urgent_kw);

    // Billing error stays P1, keyword still reported.
    let billing = by_sender_subject("li.wei@acme.io", "Need help");
    assert_eq!(billing.category, Category::BillingError);
    assert_eq!(billing.priority, Priority::P1);
    assert!(billing.has_urgent_kw);

    // Pricing with no keyword sits at the bottom.
    let pricing = by_sender_subject("sam@betacorp.com", "Question");
    assert_eq!(pricing.category, Category::Pricing);
    assert_eq!(pricing.priority, Priority::P4);
    assert!(!pricing.has_urgent_kw);

    // Login issue without keyword keeps its base.
    let login = by_sender_subject("eve@epsilon.net", "Login trouble");
    assert_eq!(login.category, Category::LoginAccess);
    assert_eq!(login.priority, Priority::P2);
}

#[tokio::test]
async fn duplicate_bodies_across_senders_share_a_count() {
    let dir = tempfile::tempdir().unwrap();
    let (run, _) = load_and_run(dir.path()).await;

    // "Refund please!!!" and "refund   please" normalize identically and
    // come from two different senders.
    for sender in ["jo@gamma.dev", "dana@delta.org"] {
        let record = run
            .classified
            .iter()
            .find(|c| c.message.sender == sender)
            .unwrap();
        assert_eq!(record.unique_senders_with_same_body, 2, "{sender}");
    }

    // The two pricing questions also normalize identically (different
    // senders), while the outage body is unique.
    let outage = run
        .classified
        .iter()
        .find(|c| c.category == Category::Outage)
        .unwrap();
    assert_eq!(outage.unique_senders_with_same_body, 1);
}

#[tokio::test]
async fn queue_is_ordered_by_priority_then_recency() {
    let dir = tempfile::tempdir().unwrap();
    let (run, _) = load_and_run(dir.path()).await;

    for pair in run.queue.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.priority < b.priority
                || (a.priority == b.priority && a.message.sent_date >= b.message.sent_date),
            "queue out of order: {} before {}",
            a.message.sender,
            b.message.sender
        );
    }

    // Both P1 messages lead the queue, newest first.
    assert_eq!(run.queue[0].message.subject, "URGENT: servers down");
    assert_eq!(run.queue[1].message.sender, "li.wei@acme.io");
}

#[tokio::test]
async fn latest_threads_collapse_per_sender_and_category() {
    let dir = tempfile::tempdir().unwrap();
    let (run, _) = load_and_run(dir.path()).await;

    // maria has an outage message and a pricing message: two threads.
    let maria_threads: Vec<_> = run
        .latest_threads
        .iter()
        .filter(|t| t.message.sender == "maria@acme.io")
        .collect();
    assert_eq!(maria_threads.len(), 2);

    // Nobody appears twice in the same category.
    let mut seen = std::collections::HashSet::new();
    for thread in &run.latest_threads {
        assert!(seen.insert((thread.message.sender.clone(), thread.category)));
    }
}

#[tokio::test]
async fn summary_counts_add_up() {
    let dir = tempfile::tempdir().unwrap();
    let (run, _) = load_and_run(dir.path()).await;

    let total: usize = run.summary.iter().map(|s| s.total).sum();
    assert_eq!(total, run.classified.len());

    for row in &run.summary {
        assert_eq!(row.total, row.p1 + row.p2 + row.p3 + row.p4, "{}", row.category);
    }

    // Busiest first.
    for pair in run.summary.windows(2) {
        assert!(pair[0].total >= pair[1].total);
    }

    // Pricing and Refund both have two messages.
    let pricing = run
        .summary
        .iter()
        .find(|s| s.category == Category::Pricing)
        .unwrap();
    assert_eq!(pricing.total, 2);
    assert_eq!(pricing.p4, 2);
}

#[tokio::test]
async fn outputs_land_on_disk_and_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let (run, _) = load_and_run(dir.path()).await;

    let out_dir = dir.path().join("outputs");
    report::write_all(&out_dir, &run).await.unwrap();

    let queue_csv = tokio::fs::read_to_string(out_dir.join(report::files::TRIAGE_QUEUE))
        .await
        .unwrap();
    // Header plus one row per classified message.
    assert_eq!(queue_csv.lines().count(), 1 + run.classified.len());
    // The quoted billing body survives rendering.
    assert!(queue_csv.contains("\"I was charged twice, this is urgent\""));

    let counts_json = tokio::fs::read_to_string(out_dir.join(report::files::CATEGORY_COUNTS))
        .await
        .unwrap();
    let counts: serde_json::Value = serde_json::from_str(&counts_json).unwrap();
    assert_eq!(counts.as_array().unwrap().len(), run.summary.len());

    let templates_doc = tokio::fs::read_to_string(out_dir.join(report::files::TEMPLATES))
        .await
        .unwrap();
    assert!(templates_doc.contains("## Outage/Downtime"));
    assert!(templates_doc.contains("{incident_id}"));
}

#[tokio::test]
async fn equal_timestamps_are_deterministic_in_latest_threads() {
    let dir = tempfile::tempdir().unwrap();
    let inbox_path = dir.path().join("inbox.csv");
    tokio::fs::write(
        &inbox_path,
        "sender,subject,body,sent_date\n\
         a@x.com,First,refund please,2025-06-01 12:00:00\n\
         a@x.com,Second,refund now please,2025-06-01 12:00:00\n",
    )
    .await
    .unwrap();

    let batch = CsvSource::new(&inbox_path).fetch().await.unwrap();
    let run = TriagePipeline::new().run(batch.messages);

    assert_eq!(run.latest_threads.len(), 1);
    // The later row in the file wins the tie.
    assert_eq!(run.latest_threads[0].message.subject, "Second");
}

// Direct sanity check that pipeline output is insensitive to batch order
// for the per-message attributes (only the dedup count is batch-wide).
#[tokio::test]
async fn per_message_attributes_ignore_batch_order() {
    use inbox_triage::pipeline::types::Message;

    let make = |sender: &str, body: &str| Message {
        sender: sender.into(),
        subject: "subject".into(),
        body: body.into(),
        sent_date: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
    };

    let pipeline = TriagePipeline::new();
    let forward = pipeline.classify_batch(vec![
        make("a@x.com", "servers are down"),
        make("b@x.com", "refund please"),
    ]);
    let reversed = pipeline.classify_batch(vec![
        make("b@x.com", "refund please"),
        make("a@x.com", "servers are down"),
    ]);

    assert_eq!(forward[0].category, reversed[1].category);
    assert_eq!(forward[0].priority, reversed[1].priority);
    assert_eq!(forward[1].category, reversed[0].category);
}
