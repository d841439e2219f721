//! CSV inbox loader.
//!
//! Expects a header row naming `sender`, `subject`, `body`, and
//! `sent_date` (any column order, extra columns ignored). Quoted fields
//! may contain commas, doubled quotes, and newlines. A row that fails to
//! parse is rejected individually; only an unreadable file or a bad
//! header fails the whole load.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tokio::fs;
use tracing::{info, warn};

use crate::error::{IngestError, RowError};
use crate::ingest::{LoadBatch, MessageSource, RejectedRow};
use crate::pipeline::types::Message;

/// Column names the header must contain.
const REQUIRED_COLUMNS: [&str; 4] = ["sender", "subject", "body", "sent_date"];

/// Loads an inbox from an on-disk CSV file.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MessageSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch(&self) -> Result<LoadBatch, IngestError> {
        let raw = fs::read_to_string(&self.path).await?;
        let batch = parse_inbox(&raw)?;

        for reject in &batch.rejects {
            warn!(line = reject.line, error = %reject.error, "Rejected inbox row");
        }
        info!(
            path = %self.path.display(),
            loaded = batch.messages.len(),
            rejected = batch.rejects.len(),
            "Inbox loaded"
        );

        Ok(batch)
    }
}

/// Parse raw CSV text into a batch.
pub fn parse_inbox(raw: &str) -> Result<LoadBatch, IngestError> {
    let mut records = parse_csv(raw).into_iter();

    let (_, header) = records.next().ok_or(IngestError::MissingHeader)?;
    let header: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();

    let column = |name: &'static str| -> Result<usize, IngestError> {
        header
            .iter()
            .position(|h| h == name)
            .ok_or(IngestError::MissingColumn(name))
    };
    let sender_col = column(REQUIRED_COLUMNS[0])?;
    let subject_col = column(REQUIRED_COLUMNS[1])?;
    let body_col = column(REQUIRED_COLUMNS[2])?;
    let sent_date_col = column(REQUIRED_COLUMNS[3])?;

    let mut batch = LoadBatch::default();
    for (line, fields) in records {
        match build_message(
            &fields,
            header.len(),
            sender_col,
            subject_col,
            body_col,
            sent_date_col,
        ) {
            Ok(message) => batch.messages.push(message),
            Err(error) => batch.rejects.push(RejectedRow { line, error }),
        }
    }

    Ok(batch)
}

fn build_message(
    fields: &[String],
    expected: usize,
    sender_col: usize,
    subject_col: usize,
    body_col: usize,
    sent_date_col: usize,
) -> Result<Message, RowError> {
    if fields.len() != expected {
        return Err(RowError::FieldCount {
            expected,
            got: fields.len(),
        });
    }

    let required = |idx: usize, name: &'static str| -> Result<&str, RowError> {
        let value = fields[idx].trim();
        if value.is_empty() {
            Err(RowError::EmptyField(name))
        } else {
            Ok(value)
        }
    };

    let sender = required(sender_col, "sender")?;
    let subject = required(subject_col, "subject")?;
    let body = required(body_col, "body")?;
    let raw_date = required(sent_date_col, "sent_date")?;

    let sent_date =
        parse_timestamp(raw_date).ok_or_else(|| RowError::BadTimestamp(raw_date.to_string()))?;

    Ok(Message {
        sender: sender.to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
        sent_date,
    })
}

/// Parse a timestamp: RFC 3339 first, then common naive formats read as
/// UTC, then a bare date at midnight.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// Split raw CSV text into records of fields.
///
/// Handles quoted fields with embedded commas, newlines, and doubled
/// quotes. Returns each record with the 1-based line it starts on (a
/// quoted field spanning lines keeps the record on its starting line).
/// Blank lines are skipped.
fn parse_csv(raw: &str) -> Vec<(usize, Vec<String>)> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut record_line = 1usize;

    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        field.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(ch),
            }
        } else {
            match ch {
                '"' if field.is_empty() => in_quotes = true,
                ',' => record.push(std::mem::take(&mut field)),
                '\r' => {} // CRLF: the '\n' that follows ends the record
                '\n' => {
                    line += 1;
                    record.push(std::mem::take(&mut field));
                    let is_blank = record.len() == 1 && record[0].is_empty();
                    if is_blank {
                        record.clear();
                    } else {
                        records.push((record_line, std::mem::take(&mut record)));
                    }
                    record_line = line;
                }
                _ => field.push(ch),
            }
        }
    }

    // Final record when the file has no trailing newline.
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push((record_line, record));
    }

    records
}
