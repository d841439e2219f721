//! Message sources — pure I/O, no classification logic.
//!
//! Sources load a whole batch at once; triage happens downstream in
//! `TriagePipeline`. Rows that cannot become a `Message` are reported
//! per row in the batch rather than failing the load.

pub mod csv;

pub use csv::CsvSource;

use async_trait::async_trait;

use crate::error::{IngestError, RowError};
use crate::pipeline::types::Message;

/// A loaded batch: the parseable messages plus the rows that were not.
#[derive(Debug, Clone, Default)]
pub struct LoadBatch {
    /// Messages in source order.
    pub messages: Vec<Message>,
    /// Rows rejected during parsing, with their reasons.
    pub rejects: Vec<RejectedRow>,
}

/// A row that could not be turned into a `Message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line number where the row starts in the source.
    pub line: usize,
    /// Why the row was rejected.
    pub error: RowError,
}

/// Trait for message sources.
///
/// Implementations handle fetching only; they never classify. A source
/// fails as a whole only when its input is unreadable — individual bad
/// rows land in `LoadBatch::rejects`.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Source name for logging (e.g. "csv").
    fn name(&self) -> &str;

    /// Load the full batch.
    async fn fetch(&self) -> Result<LoadBatch, IngestError>;
}
