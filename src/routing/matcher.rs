//! Path prefix matching.
//!
//! # Design Decisions
//! - Matching is case-sensitive and purely textual (no segment parsing)
//! - The longest matching prefix wins, measured in bytes
//! - Prefixes are unique keys, so two candidates never share a length
//! - O(n) scan over the prefixes of one method (acceptable for typical route counts)

use std::collections::BTreeMap;

/// Returns true if `path` falls under `prefix`.
pub fn matches_prefix(prefix: &str, path: &str) -> bool {
    path.starts_with(prefix)
}

/// Find the most specific prefix in `prefixes` that `path` starts with.
pub fn longest_prefix<'a, V>(
    prefixes: &'a BTreeMap<String, V>,
    path: &str,
) -> Option<(&'a str, &'a V)> {
    prefixes
        .iter()
        .filter(|(prefix, _)| matches_prefix(prefix, path))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(prefix, value)| (prefix.as_str(), value))
}
