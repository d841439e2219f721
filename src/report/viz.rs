//! Chart-ready export of per-category message counts.
//!
//! Emits plain JSON for an external renderer (D3, a spreadsheet, a
//! dashboard) instead of drawing in-process. Entries arrive pre-sorted,
//! busiest category first, so renderers can plot them as-is.

use serde::Serialize;

use crate::error::ReportError;
use crate::pipeline::types::CategorySummary;

/// One bar of the category-count chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: &'static str,
    pub count: usize,
}

/// Project the summary into chart entries (order preserved).
pub fn category_counts(summary: &[CategorySummary]) -> Vec<CategoryCount> {
    summary
        .iter()
        .map(|row| CategoryCount {
            category: row.category.label(),
            count: row.total,
        })
        .collect()
}

/// Render the chart data as pretty-printed JSON.
pub fn render_category_counts(summary: &[CategorySummary]) -> Result<String, ReportError> {
    let counts = category_counts(summary);
    Ok(serde_json::to_string_pretty(&counts)?)
}
