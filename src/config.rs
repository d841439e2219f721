//! Configuration types.

use std::path::PathBuf;

/// Triage run configuration.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Path to the inbox CSV file.
    pub inbox_path: PathBuf,
    /// Directory where run outputs are written.
    pub output_dir: PathBuf,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            inbox_path: PathBuf::from("data/inbox.csv"),
            output_dir: PathBuf::from("outputs"),
        }
    }
}

impl TriageConfig {
    /// Read configuration from `INBOX_TRIAGE_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            inbox_path: std::env::var("INBOX_TRIAGE_INBOX")
                .map(PathBuf::from)
                .unwrap_or(defaults.inbox_path),
            output_dir: std::env::var("INBOX_TRIAGE_OUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        }
    }
}
