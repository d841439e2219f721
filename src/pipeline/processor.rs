//! Triage pipeline — classifies a message batch and builds output views.
//!
//! Flow:
//! 1. Per-message enrichment (normalize + classify + score). Each record
//!    is a pure function of its own subject/body; batch order is
//!    irrelevant here.
//! 2. Duplicate detection — the single cross-record stage. It needs the
//!    complete set of normalized bodies before any count is final, so it
//!    runs as a barrier after all per-message work.
//! 3. Projections — triage queue, latest threads, per-category summary.
//!    Pure sorts and groupings over the classified set; no further
//!    enrichment happens downstream.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::pipeline::classify::Classifier;
use crate::pipeline::dedup;
use crate::pipeline::normalize::normalize;
use crate::pipeline::types::{
    Category, CategorySummary, ClassifiedMessage, Message, Priority,
};
use crate::pipeline::urgency::{self, UrgencyScore};

/// Classifies message batches.
///
/// Holds the compiled rule set; everything else is per-call state
/// constructed fresh on each run.
#[derive(Debug, Clone)]
pub struct TriagePipeline {
    classifier: Classifier,
}

/// Complete output of one pipeline run.
#[derive(Debug, Clone)]
pub struct TriageRun {
    /// Every classified message, in input order.
    pub classified: Vec<ClassifiedMessage>,
    /// The full set in triage order.
    pub queue: Vec<ClassifiedMessage>,
    /// Chronologically last message per (sender, category), triage order.
    pub latest_threads: Vec<ClassifiedMessage>,
    /// Per-category totals, busiest first.
    pub summary: Vec<CategorySummary>,
}

impl TriagePipeline {
    /// Pipeline with the built-in rule set.
    pub fn new() -> Self {
        Self {
            classifier: Classifier::default_rules(),
        }
    }

    /// Pipeline with a caller-supplied rule set.
    pub fn with_classifier(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Run the whole pipeline: classify the batch and build every view.
    pub fn run(&self, messages: Vec<Message>) -> TriageRun {
        let classified = self.classify_batch(messages);
        let queue = triage_queue(&classified);
        let latest = latest_threads(&classified);
        let summary = summarize(&classified);

        info!(
            classified = classified.len(),
            threads = latest.len(),
            categories = summary.len(),
            "Triage run complete"
        );

        TriageRun {
            classified,
            queue,
            latest_threads: latest,
            summary,
        }
    }

    /// Classify every message and attach batch-wide duplicate counts.
    pub fn classify_batch(&self, messages: Vec<Message>) -> Vec<ClassifiedMessage> {
        let count = messages.len();
        info!(count, "Classifying message batch");

        let mut classified: Vec<ClassifiedMessage> = messages
            .into_iter()
            .map(|message| self.classify_one(message))
            .collect();

        // Dedup barrier: counts are only final once every normalized
        // body in the batch is known.
        let counts = dedup::unique_sender_counts(
            classified
                .iter()
                .map(|c| (c.message.sender.as_str(), c.normalized_body.as_str())),
        );
        for record in &mut classified {
            record.unique_senders_with_same_body = counts
                .get(&record.normalized_body)
                .copied()
                .unwrap_or(1);
        }

        classified
    }

    fn classify_one(&self, message: Message) -> ClassifiedMessage {
        let category = self.classifier.classify(&message.subject, &message.body);
        let UrgencyScore {
            priority,
            has_urgent_kw,
        } = urgency::score(&message.subject, &message.body, category);
        let normalized_body = normalize(&message.body);

        debug!(
            sender = %message.sender,
            category = %category,
            priority = %priority,
            has_urgent_kw,
            "Classified message"
        );

        ClassifiedMessage {
            message,
            category,
            priority,
            has_urgent_kw,
            normalized_body,
            unique_senders_with_same_body: 1,
        }
    }
}

impl Default for TriagePipeline {
    fn default() -> Self {
        Self::new()
    }
}

// ── Projections ─────────────────────────────────────────────────────

/// Sort the full set into triage order: most urgent first, and within a
/// priority level, most recent first.
pub fn triage_queue(classified: &[ClassifiedMessage]) -> Vec<ClassifiedMessage> {
    let mut queue = classified.to_vec();
    sort_triage(&mut queue);
    queue
}

/// Keep only the chronologically last message per (sender, category),
/// then apply the triage sort to the reduced set.
pub fn latest_threads(classified: &[ClassifiedMessage]) -> Vec<ClassifiedMessage> {
    let mut latest: HashMap<(&str, Category), &ClassifiedMessage> = HashMap::new();
    for record in classified {
        let key = (record.message.sender.as_str(), record.category);
        // Strictly newer entries stay; equal timestamps let the later
        // batch entry win.
        let replace = latest
            .get(&key)
            .is_none_or(|existing| existing.message.sent_date <= record.message.sent_date);
        if replace {
            latest.insert(key, record);
        }
    }

    let mut threads: Vec<ClassifiedMessage> = latest.into_values().cloned().collect();
    sort_triage(&mut threads);
    threads
}

/// Per-category totals and priority breakdown, busiest category first.
/// Ties on total break on the category label so output order is
/// reproducible.
pub fn summarize(classified: &[ClassifiedMessage]) -> Vec<CategorySummary> {
    let mut by_category: HashMap<Category, CategorySummary> = HashMap::new();
    for record in classified {
        let entry = by_category
            .entry(record.category)
            .or_insert_with(|| CategorySummary::empty(record.category));
        entry.total += 1;
        match record.priority {
            Priority::P1 => entry.p1 += 1,
            Priority::P2 => entry.p2 += 1,
            Priority::P3 => entry.p3 += 1,
            Priority::P4 => entry.p4 += 1,
        }
    }

    let mut summary: Vec<CategorySummary> = by_category.into_values().collect();
    summary.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.label().cmp(b.category.label()))
    });
    summary
}

fn sort_triage(records: &mut [ClassifiedMessage]) {
    records.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.message.sent_date.cmp(&a.message.sent_date))
    });
}
