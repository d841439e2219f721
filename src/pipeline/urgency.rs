//! Urgency scoring — fixed base priority per category, keyword escalation.
//!
//! Priority is a deterministic function of (category, keyword presence),
//! so triage ordering is reproducible and auditable. No weighting.

use crate::pipeline::types::{Category, Priority};

/// Keywords whose presence bumps a message one level more urgent.
/// Checked by substring containment in lowercased subject + body.
pub const URGENT_KEYWORDS: [&str; 4] = ["urgent", "immediate", "critical", "highly critical"];

/// Result of scoring one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrgencyScore {
    /// Final priority after escalation.
    pub priority: Priority,
    /// Raw keyword presence, reported whether or not it changed the
    /// priority.
    pub has_urgent_kw: bool,
}

/// Base priority table, fixed per category.
pub fn base_priority(category: Category) -> Priority {
    match category {
        Category::Outage | Category::BillingError => Priority::P1,
        Category::LoginAccess | Category::Refund => Priority::P2,
        Category::Verification | Category::ApiIntegration => Priority::P3,
        Category::Pricing | Category::Other => Priority::P4,
    }
}

/// Score a message: base priority by category, escalated one level when
/// an urgency keyword appears anywhere in subject or body. Escalation
/// never crosses below P1 and never changes the category.
pub fn score(subject: &str, body: &str, category: Category) -> UrgencyScore {
    let text = format!("{subject} {body}").to_lowercase();
    let has_urgent_kw = URGENT_KEYWORDS.iter().any(|kw| text.contains(kw));

    let base = base_priority(category);
    let priority = if has_urgent_kw { base.escalate() } else { base };

    UrgencyScore {
        priority,
        has_urgent_kw,
    }
}
