// Paragraph-heuristic segmentation for documents without structural markers
use shared_types::Clause;

use super::SegmentationStrategy;
use crate::patterns::{is_title_case, is_upper, PARAGRAPH_BREAK};

/// A paragraph block must be longer than this to count as a clause
pub const MIN_PARAGRAPH_CHARS: usize = 100;

/// First lines at or above this length are never headings
pub const MAX_HEADING_CHARS: usize = 80;

/// Title-case first lines need fewer words than this to be headings
pub const MAX_HEADING_WORDS: usize = 8;

/// Splits on blank lines and treats each long enough block as a clause.
///
/// Ids and generated "Clause N" titles follow the block's position among all
/// blocks, so skipped short blocks leave gaps in the numbering.
pub struct ParagraphStrategy;

impl SegmentationStrategy for ParagraphStrategy {
    fn name(&self) -> &'static str {
        "paragraphs"
    }

    fn segment(&self, text: &str) -> Vec<Clause> {
        let mut clauses = Vec::new();

        for (index, block) in PARAGRAPH_BREAK.split(text).enumerate() {
            let block = block.trim();
            if block.chars().count() <= MIN_PARAGRAPH_CHARS {
                continue;
            }

            let lines: Vec<&str> = block.split('\n').collect();
            let first_line = lines[0].trim();

            let clause = if is_heading(first_line) && lines.len() > 1 {
                let content = lines[1..].join("\n");
                Clause::new(index, first_line, content.trim())
            } else {
                Clause::new(index, format!("Clause {}", index + 1), block)
            };

            clauses.push(clause);
        }

        clauses
    }
}

/// Short lines that are all caps, or title case with only a few words
fn is_heading(line: &str) -> bool {
    line.chars().count() < MAX_HEADING_CHARS
        && (is_upper(line)
            || (line.split_whitespace().count() < MAX_HEADING_WORDS && is_title_case(line)))
}
