//! Display titles from raw clause header text

use crate::patterns::{collapse_whitespace, TITLE_PREFIX_PATTERNS};

/// Longest title returned before truncation kicks in
pub const MAX_TITLE_CHARS: usize = 60;

/// Title used when nothing is left of the header after cleaning
pub const UNTITLED_CLAUSE: &str = "Untitled Clause";

/// Produce a clean display title from a clause header such as "ARTICLE 3 - Payment Terms".
///
/// Prefix patterns are applied one after another to the already rewritten
/// header, so each sees the output of the previous one.
pub fn extract_title(header: &str) -> String {
    let mut title = collapse_whitespace(header);

    for pattern in TITLE_PREFIX_PATTERNS.iter() {
        title = pattern.replace(&title, "").into_owned();
    }

    if title.trim().is_empty() {
        return UNTITLED_CLAUSE.to_string();
    }

    if title.chars().count() > MAX_TITLE_CHARS {
        let head: String = title.chars().take(MAX_TITLE_CHARS - 3).collect();
        return format!("{}...", head);
    }

    title
}
