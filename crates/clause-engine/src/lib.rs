//! Clause segmentation for legal documents
//!
//! Turns the raw text extracted from a contract, lease or agreement into an
//! ordered list of [`Clause`] records with clean titles and previews.
//!
//! Segmentation is a chain of strategies tried in order:
//! 1. Markers - structural headers such as "ARTICLE 1" or "§ 4.2"
//! 2. Paragraphs - blank-line separated blocks with heading detection
//!
//! Everything here is pure and synchronous; a [`ClauseSegmenter`] holds no
//! mutable state and can be shared freely across threads.

pub mod patterns;
pub mod strategies;
pub mod title;

pub use strategies::{MarkerStrategy, ParagraphStrategy, SegmentationStrategy};
pub use title::{extract_title, MAX_TITLE_CHARS, UNTITLED_CLAUSE};

use shared_types::Clause;
use tracing::debug;

/// A strategy result with at least this many clauses is accepted
pub const MIN_ACCEPTED_CLAUSES: usize = 2;

/// ClauseSegmenter entry point
pub struct ClauseSegmenter {
    strategies: Vec<Box<dyn SegmentationStrategy>>,
}

impl ClauseSegmenter {
    /// Markers first, paragraphs as the fallback
    pub fn new() -> Self {
        Self::with_strategies(vec![Box::new(MarkerStrategy), Box::new(ParagraphStrategy)])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn SegmentationStrategy>>) -> Self {
        Self { strategies }
    }

    /// Split `text` into clauses.
    ///
    /// The first strategy producing at least [`MIN_ACCEPTED_CLAUSES`] clauses
    /// wins. Otherwise its partial result is discarded and the next strategy
    /// runs; the last strategy's result is returned as-is, even when empty.
    pub fn segment(&self, text: &str) -> Vec<Clause> {
        let last = self.strategies.len().saturating_sub(1);

        for (i, strategy) in self.strategies.iter().enumerate() {
            let clauses = strategy.segment(text);
            debug!(
                strategy = strategy.name(),
                clauses = clauses.len(),
                "Segmentation strategy finished"
            );

            if clauses.len() >= MIN_ACCEPTED_CLAUSES || i == last {
                return clauses;
            }
        }

        Vec::new()
    }
}

impl Default for ClauseSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Segment `text` with the default strategy chain
pub fn split_into_clauses(text: &str) -> Vec<Clause> {
    ClauseSegmenter::new().segment(text)
}
