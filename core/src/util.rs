//! Small helpers shared by the resource clients.

use std::collections::HashSet;
use std::hash::Hash;

/// Remove duplicates, keeping the first occurrence of each value in order.
pub fn dedup<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Join values with commas for list-valued query parameters.
///
/// Each value is percent-encoded on its own, so only the separators are
/// literal commas.
pub fn join_csv<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| encode_component(&item.to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Percent-encode a single path segment or query parameter value.
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
