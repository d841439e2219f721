//! Error types for inbox triage.
//!
//! Classification itself is total — every message gets a category and a
//! priority — so the only failure surfaces are loading input and writing
//! output. Row-level parse problems are not errors in this sense: they are
//! reported per row alongside the loaded batch (`RowError`).

/// Top-level error type for a triage run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Errors that abort loading the whole inbox.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input has no header row")]
    MissingHeader,

    #[error("Header is missing required column: {0}")]
    MissingColumn(&'static str),
}

/// A single row that could not become a `Message`.
///
/// Carried in the load batch with its line number; never aborts the load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("expected {expected} fields, got {got}")]
    FieldCount { expected: usize, got: usize },

    #[error("required field is empty: {0}")]
    EmptyField(&'static str),

    #[error("unparseable timestamp: {0:?}")]
    BadTimestamp(String),
}

/// Errors while writing run outputs.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
