//! Ordered category rules — first match wins.
//!
//! Each rule is a regex checked against `"{subject} {body}"` lowercased.
//! Rule order is part of the contract: a text matching several patterns
//! gets the earliest category, so an outage complaint that also mentions
//! billing still classifies as an outage. Reordering rules is a breaking
//! change.

use regex::Regex;

use crate::pipeline::types::Category;

/// A single category rule with a compiled regex.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    /// Category assigned when the pattern matches.
    pub category: Category,
    /// Compiled pattern, matched anywhere in the lowercased text.
    pub regex: Regex,
}

/// Ordered rule list evaluated top to bottom.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CategoryRule>,
}

impl Classifier {
    /// Built-in rule set, in precedence order.
    ///
    /// Patterns match lowercased text, so they are written in lowercase
    /// rather than with `(?i)`. Some deliberately match loosely (bare
    /// "pricing", `verif(y|ication)`) — tightening them changes which
    /// texts land where.
    pub fn default_rules() -> Self {
        let rules = vec![
            rule(
                Category::Outage,
                r"\bservers? (are )?down\b|downtime|system .*inaccessible|completely inaccessible",
            ),
            rule(Category::BillingError, r"billing error|charged twice"),
            rule(
                Category::LoginAccess,
                r"unable to log in|system access blocked|cannot reset my password|reset link doesn.?t work",
            ),
            rule(Category::Verification, r"verif(y|ication)|verification email"),
            rule(Category::Pricing, r"pricing tiers|product pricing|pricing"),
            rule(
                Category::ApiIntegration,
                r"\bintegration\b|third-party apis|crm",
            ),
            rule(Category::Refund, r"\brefund\b"),
        ];
        Self { rules }
    }

    /// Classify one message.
    ///
    /// Total: when no rule matches, the message is `Other`.
    pub fn classify(&self, subject: &str, body: &str) -> Category {
        let text = format!("{subject} {body}").to_lowercase();
        for rule in &self.rules {
            if rule.regex.is_match(&text) {
                return rule.category;
            }
        }
        Category::Other
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::default_rules()
    }
}

fn rule(category: Category, pattern: &str) -> CategoryRule {
    CategoryRule {
        category,
        regex: Regex::new(pattern).unwrap(),
    }
}
