//! Text normalization helpers shared by the extractors

use std::collections::HashSet;

/// Collapse whitespace runs to a single space and trim.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize, then cut to `max_chars` characters with a trailing `...`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    let text = normalize_text(text);
    if text.chars().count() <= max_chars {
        return text;
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Drop repeated items, keeping the first occurrence of each.
pub fn unique_keep_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
