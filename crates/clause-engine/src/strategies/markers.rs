// Structural-marker segmentation: split on ARTICLE / SECTION / CLAUSE / § / "1. Title" headers
use regex::Regex;
use shared_types::Clause;
use tracing::debug;

use super::SegmentationStrategy;
use crate::patterns::MARKER_PATTERNS;
use crate::title::extract_title;

/// A marker's body must be longer than this to count as a clause
pub const MIN_MARKER_BODY_CHARS: usize = 50;

/// Tries each marker pattern in priority order; the first one that yields
/// at least one clause wins and later patterns are never consulted.
pub struct MarkerStrategy;

impl SegmentationStrategy for MarkerStrategy {
    fn name(&self) -> &'static str {
        "markers"
    }

    fn segment(&self, text: &str) -> Vec<Clause> {
        for (pattern, name) in MARKER_PATTERNS.iter() {
            let clauses = split_on_markers(text, pattern);
            if !clauses.is_empty() {
                debug!(pattern = name, clauses = clauses.len(), "Marker pattern matched");
                return clauses;
            }
        }

        Vec::new()
    }
}

/// Split `text` on every match of `pattern`, pairing each marker with the
/// body that follows it up to the next marker. Text before the first marker
/// is preamble and is dropped.
fn split_on_markers(text: &str, pattern: &Regex) -> Vec<Clause> {
    let markers: Vec<_> = pattern.find_iter(text).collect();
    let mut clauses = Vec::new();

    for (i, marker) in markers.iter().enumerate() {
        let body_end = markers.get(i + 1).map_or(text.len(), |next| next.start());
        let body = text[marker.end()..body_end].trim();

        if body.chars().count() > MIN_MARKER_BODY_CHARS {
            let title = extract_title(marker.as_str().trim());
            clauses.push(Clause::new(clauses.len(), title, body));
        }
    }

    clauses
}
