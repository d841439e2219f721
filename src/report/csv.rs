//! CSV rendering for triage outputs.
//!
//! Hand-rolled writer: fields containing a comma, quote, or newline are
//! quoted, with inner quotes doubled. Timestamps are RFC 3339.

use crate::pipeline::types::{CategorySummary, ClassifiedMessage};

const MESSAGE_HEADER: &str = "sender,subject,body,sent_date,category,priority,priority_label,has_urgent_kw,unique_senders_with_same_body";

const SUMMARY_HEADER: &str = "category,total,p1,p2,p3,p4";

/// Render classified messages (any view: full set, queue, threads).
///
/// The normalized body is intermediate state and is not written.
pub fn render_messages(records: &[ClassifiedMessage]) -> String {
    let mut out = String::from(MESSAGE_HEADER);
    out.push('\n');

    for record in records {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            escape(&record.message.sender),
            escape(&record.message.subject),
            escape(&record.message.body),
            record.message.sent_date.to_rfc3339(),
            escape(record.category.label()),
            record.priority.rank(),
            escape(record.priority.label()),
            record.has_urgent_kw,
            record.unique_senders_with_same_body,
        ));
    }

    out
}

/// Render the per-category summary.
pub fn render_summary(rows: &[CategorySummary]) -> String {
    let mut out = String::from(SUMMARY_HEADER);
    out.push('\n');

    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            escape(row.category.label()),
            row.total,
            row.p1,
            row.p2,
            row.p3,
            row.p4,
        ));
    }

    out
}

/// Quote a field when it contains a comma, quote, or newline.
fn escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
