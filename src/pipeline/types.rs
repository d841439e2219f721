//! Shared types for the triage pipeline.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Inbound message ─────────────────────────────────────────────────

/// A single inbound support message, as read from the inbox.
///
/// Loaders convert their native format into this struct. The pipeline
/// treats it as immutable input; classification derives from it, never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sender identity (email address or handle). Not unique per batch.
    pub sender: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// When the message was sent.
    pub sent_date: DateTime<Utc>,
}

// ── Category ────────────────────────────────────────────────────────

/// Ticket category, assigned by ordered rule matching.
///
/// The set is closed: every message gets exactly one variant, with
/// `Other` as the guaranteed fallback when no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Outage/Downtime")]
    Outage,
    #[serde(rename = "Billing Error (Charged Twice)")]
    BillingError,
    #[serde(rename = "Login/Access Issue")]
    LoginAccess,
    #[serde(rename = "Account Verification")]
    Verification,
    #[serde(rename = "Pricing Information")]
    Pricing,
    #[serde(rename = "API/Integration")]
    ApiIntegration,
    #[serde(rename = "Refund/Chargeback")]
    Refund,
    Other,
}

impl Category {
    /// Every variant, in rule-precedence order (`Other` last).
    pub const ALL: [Category; 8] = [
        Category::Outage,
        Category::BillingError,
        Category::LoginAccess,
        Category::Verification,
        Category::Pricing,
        Category::ApiIntegration,
        Category::Refund,
        Category::Other,
    ];

    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Outage => "Outage/Downtime",
            Self::BillingError => "Billing Error (Charged Twice)",
            Self::LoginAccess => "Login/Access Issue",
            Self::Verification => "Account Verification",
            Self::Pricing => "Pricing Information",
            Self::ApiIntegration => "API/Integration",
            Self::Refund => "Refund/Chargeback",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Priority ────────────────────────────────────────────────────────

/// Urgency rank: P1 (most urgent) through P4 (least urgent).
///
/// An enum rather than a bare integer so the numeric rank and the
/// display label cannot drift apart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Priority {
    P1,
    P2,
    P3,
    P4,
}

impl Priority {
    /// Numeric rank, 1 = most urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Self::P1 => 1,
            Self::P2 => 2,
            Self::P3 => 3,
            Self::P4 => 4,
        }
    }

    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::P1 => "P1 - Critical",
            Self::P2 => "P2 - High",
            Self::P3 => "P3 - Medium",
            Self::P4 => "P4 - Low",
        }
    }

    /// One level more urgent. P1 stays P1 — there is nothing above it.
    pub fn escalate(self) -> Self {
        match self {
            Self::P1 | Self::P2 => Self::P1,
            Self::P3 => Self::P2,
            Self::P4 => Self::P3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Classified message ──────────────────────────────────────────────

/// A message enriched by one pipeline run.
///
/// Produced once per run and never mutated afterward; the queue, the
/// latest-threads view, and the summary are projections over the set.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedMessage {
    /// The original message, unchanged.
    #[serde(flatten)]
    pub message: Message,
    /// Category from ordered rule matching.
    pub category: Category,
    /// Final priority after keyword escalation.
    pub priority: Priority,
    /// Whether an urgency keyword appeared in subject or body,
    /// regardless of whether it changed the priority.
    pub has_urgent_kw: bool,
    /// Canonical body used only for duplicate grouping. Intermediate
    /// state — not written to reports.
    #[serde(skip)]
    pub normalized_body: String,
    /// Distinct senders across the whole batch whose normalized body
    /// equals this one. Always at least 1 (the message itself).
    pub unique_senders_with_same_body: usize,
}

// ── Summary ─────────────────────────────────────────────────────────

/// Per-category roll-up emitted by `summarize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    /// Messages in this category.
    pub total: usize,
    /// Count at each priority level.
    pub p1: usize,
    pub p2: usize,
    pub p3: usize,
    pub p4: usize,
}

impl CategorySummary {
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            total: 0,
            p1: 0,
            p2: 0,
            p3: 0,
            p4: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rank_and_label_stay_paired() {
        let all = [Priority::P1, Priority::P2, Priority::P3, Priority::P4];
        for p in all {
            assert!(p.label().starts_with(&format!("P{}", p.rank())));
        }
    }

    #[test]
    fn priority_escalate_never_goes_below_p1() {
        assert_eq!(Priority::P1.escalate(), Priority::P1);
        assert_eq!(Priority::P2.escalate(), Priority::P1);
        assert_eq!(Priority::P3.escalate(), Priority::P2);
        assert_eq!(Priority::P4.escalate(), Priority::P3);
    }

    #[test]
    fn priority_orders_most_urgent_first() {
        assert!(Priority::P1 < Priority::P2);
        assert!(Priority::P2 < Priority::P3);
        assert!(Priority::P3 < Priority::P4);
    }

    #[test]
    fn category_labels_are_distinct() {
        let labels: std::collections::HashSet<_> =
            Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), Category::ALL.len());
    }

    #[test]
    fn category_serializes_to_report_label() {
        let json = serde_json::to_value(Category::BillingError).unwrap();
        assert_eq!(json, "Billing Error (Charged Twice)");
        let json = serde_json::to_value(Category::Other).unwrap();
        assert_eq!(json, "Other");
    }

    #[test]
    fn classified_message_skips_normalized_body_in_json() {
        let classified = ClassifiedMessage {
            message: Message {
                sender: "alice@example.com".into(),
                subject: "Hello".into(),
                body: "A question".into(),
                sent_date: Utc::now(),
            },
            category: Category::Other,
            priority: Priority::P4,
            has_urgent_kw: false,
            normalized_body: "a question".into(),
            unique_senders_with_same_body: 1,
        };
        let json = serde_json::to_value(&classified).unwrap();
        assert!(json.get("normalized_body").is_none());
        assert_eq!(json["sender"], "alice@example.com");
        assert_eq!(json["category"], "Other");
    }
}
