//! Segmentation strategies, tried in order by the segmenter
//!
//! 1. Markers - split on structural headers (ARTICLE, SECTION, CLAUSE, §, "1. Title")
//! 2. Paragraphs - fall back to blank-line separated blocks with heading detection

pub mod markers;
pub mod paragraphs;

pub use markers::MarkerStrategy;
pub use paragraphs::ParagraphStrategy;

use shared_types::Clause;

/// A pure text-to-clauses pass
pub trait SegmentationStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Split `text` into clauses in order of appearance
    fn segment(&self, text: &str) -> Vec<Clause>;
}
