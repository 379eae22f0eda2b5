pub mod document;
pub mod types;

pub use document::LegalDocument;
pub use types::{make_preview, Clause, ClauseAnalysis, RiskLevel, PREVIEW_CHARS};
