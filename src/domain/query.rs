//! Query sanitation and the minimum-length search guard.
//!
//! Raw typed text is sanitized on every keystroke before the coalescer sees
//! it: characters outside letters, digits and whitespace are stripped, and
//! queries shorter than [`MIN_QUERY_LEN`] never reach the network.

/// Minimum sanitized query length required before a lookup is attempted.
///
/// Anything shorter is a silent no-op guard, not an error: suggestions are
/// cleared and no request is scheduled.
pub const MIN_QUERY_LEN: usize = 5;

/// Sanitizes raw input for use as a completion query.
///
/// Strips every character that is not alphanumeric or whitespace, then trims
/// surrounding whitespace. Alphanumeric is Unicode-aware, so accented street
/// and city names survive ("Champs-Élysées" → "ChampsÉlysées").
#[must_use]
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Returns whether a sanitized query is long enough to search for.
///
/// Length is counted in characters, not bytes, so the threshold behaves the
/// same for accented input.
#[must_use]
pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_LEN
}
