//! Regex patterns and text predicates used for clause detection

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Structural markers, in priority order. Each matches a whole header line
    /// introduced by a line break, including the trailing newline. The number
    /// after a keyword must sit on the same line.
    pub static ref MARKER_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"\n\s*ARTICLE(?:[ \t]+\d+)?[^\n]*\n").unwrap(), "article"),
        (Regex::new(r"\n\s*SECTION(?:[ \t]+[\d.]+)?[^\n]*\n").unwrap(), "section"),
        (Regex::new(r"\n\s*CLAUSE(?:[ \t]+[\d.]+)?[^\n]*\n").unwrap(), "clause"),
        (Regex::new(r"\n\s*§\s*[\d.]+[^\n]*\n").unwrap(), "section-sign"),
        (Regex::new(r"\n\s*[\dIVX]+\.\s+[A-Z][^\n]*\n").unwrap(), "numbered"),
    ];

    /// One or more blank lines between paragraph blocks
    pub static ref PARAGRAPH_BREAK: Regex = Regex::new(r"\n\s*\n").unwrap();

    /// Header prefixes stripped by the title extractor, applied in order
    pub static ref TITLE_PREFIX_PATTERNS: Vec<Regex> = vec![
        // "ARTICLE 3 -", "SECTION 2.1:", "§ 4.2", "CLAUSE IV." or a bare "3."
        Regex::new(
            r"(?i)^(?:(?:(?:ARTICLE|SECTION|CLAUSE)\b|§)\s*(?:[\dIVX]+(?:\.[\dIVX]+)*\b)?(?:\s*[-–:.])?|[\dIVX]+\.)\s*"
        )
        .unwrap(),
        // "IV - "
        Regex::new(r"(?i)^\s*[\dIVX]+\s*[-–]\s*").unwrap(),
        // "(a) "
        Regex::new(r"^\s*\([a-zA-Z]\)\s*").unwrap(),
    ];
}

/// Collapse every run of whitespace, newlines included, to a single space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the text has at least one cased character and no lower-case ones
pub fn is_upper(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// True when every word starts upper-case and continues lower-case.
///
/// A word is a run of cased characters, so "Landlord's" fails (the "s" after
/// the apostrophe starts a new word) and "Terms of Payment" fails on "of".
pub fn is_title_case(text: &str) -> bool {
    let mut previous_is_cased = false;
    let mut cased = false;

    for c in text.chars() {
        if c.is_uppercase() {
            if previous_is_cased {
                return false;
            }
            previous_is_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !previous_is_cased {
                return false;
            }
            previous_is_cased = true;
            cased = true;
        } else {
            previous_is_cased = false;
        }
    }

    cased
}
