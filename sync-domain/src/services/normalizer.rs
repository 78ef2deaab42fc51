// Text canonicalization for comparisons
// Source titles and venue names drift in formatting between runs and
// between sources; everything is compared in this canonical form

/// Connective words that vary freely between listings of the same show.
const TITLE_STOP_WORDS: &[&str] = &["with", "and", "feat", "featuring"];

/// Canonical form of an event title: trimmed, lowercased, punctuation
/// stripped, whitespace collapsed, stop words removed. Idempotent.
pub fn normalize_title(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect();
    stripped
        .split_whitespace()
        .filter(|word| !TITLE_STOP_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical form of a venue name: trimmed, lowercased, whitespace
/// collapsed. Venue names are short and structurally stable, so no stop-word
/// or punctuation handling.
pub fn normalize_venue(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
