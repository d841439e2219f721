//! Classification-and-prioritization pipeline.
//!
//! A batch of inbound messages flows through:
//! 1. `Classifier` — ordered rule matching, first match wins
//! 2. `urgency::score` — base priority by category + keyword escalation
//! 3. `normalize` + `dedup` — duplicate grouping across the batch
//! 4. Projections — triage queue, latest threads, category summary
//!
//! Steps 1–2 are pure per-message functions; step 3 is the only
//! cross-record stage. The pipeline holds no state across runs.

pub mod classify;
pub mod dedup;
pub mod normalize;
pub mod processor;
pub mod types;
pub mod urgency;

pub use classify::{CategoryRule, Classifier};
pub use normalize::normalize;
pub use processor::{TriagePipeline, TriageRun, latest_threads, summarize, triage_queue};
pub use types::{Category, CategorySummary, ClassifiedMessage, Message, Priority};
pub use urgency::{URGENT_KEYWORDS, UrgencyScore};
