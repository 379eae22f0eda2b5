//! Capabilities the document pipeline depends on

use async_trait::async_trait;
use shared_types::ClauseAnalysis;

use crate::error::Result;

/// Plain-language analysis of legal text.
///
/// Implementations report failures as errors; callers decide how to
/// degrade (the pipeline turns them into placeholder text).
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Short name used in logs and the health endpoint
    fn name(&self) -> &'static str;

    /// Synopsis of a whole document
    async fn summarize(&self, text: &str) -> Result<String>;

    /// Summary and risk rating for one clause
    async fn analyze_clause(&self, clause_text: &str) -> Result<ClauseAnalysis>;

    /// Answer a question using only the given document text
    async fn answer(&self, question: &str, document_text: &str) -> Result<String>;
}

/// Translation of display strings (titles, summaries, answers)
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String>;
}
