//! Duplicate detection — distinct senders per identical normalized body.
//!
//! Batch-wide join: group by normalized body, count distinct senders per
//! group, broadcast the count back to every member. Needs the complete
//! batch before any count is final, so it runs after all per-message
//! classification.

use std::collections::{HashMap, HashSet};

/// Count distinct senders per normalized body across the whole batch.
///
/// Takes `(sender, normalized_body)` pairs; returns normalized body →
/// number of distinct senders sharing it. Two messages from the same
/// sender with identical normalized bodies count once. A body nobody
/// else sent maps to 1.
pub fn unique_sender_counts<'a, I>(pairs: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut senders_by_body: HashMap<&str, HashSet<&str>> = HashMap::new();
    for (sender, body) in pairs {
        senders_by_body.entry(body).or_default().insert(sender);
    }

    senders_by_body
        .into_iter()
        .map(|(body, senders)| (body.to_string(), senders.len()))
        .collect()
}
