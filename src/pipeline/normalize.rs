//! Body canonicalization for duplicate comparison.
//!
//! "Refund please!!!" and "refund   please" must compare equal, so the
//! canonical form keeps only lowercase ASCII alphanumerics with single
//! spaces between runs.

/// Canonicalize free text for duplicate grouping.
///
/// Lowercases the input, collapses every maximal run of characters other
/// than ASCII letters/digits into a single space, and trims the ends.
/// Total and idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        let lc = ch.to_ascii_lowercase();
        if lc.is_ascii_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(lc);
        } else {
            pending_space = true;
        }
    }
    out
}
