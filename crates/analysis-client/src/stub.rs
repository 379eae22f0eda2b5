//! Offline provider returning canned, deterministic results
//!
//! Used when no API key is configured so the service stays usable for demos
//! and tests. The canned entry is picked from a SHA-256 digest of the input,
//! so the same clause always gets the same summary and risk.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use shared_types::{ClauseAnalysis, RiskLevel};
use tracing::debug;

use crate::error::Result;
use crate::provider::{AnalysisProvider, Translator};

const DOCUMENT_SUMMARY: &str = "This rental agreement outlines the terms between John Doe (Tenant) and ABC Properties (Landlord) for the property at 123 Main St. Key points include a 12-month lease term, monthly rent of $1500, and a security deposit of one month's rent.";

const CLAUSE_SUMMARIES: &[&str] = &[
    "This clause outlines the payment terms and schedule.",
    "This section describes the termination conditions for the agreement.",
    "This clause specifies the confidentiality obligations of both parties.",
    "This section covers the intellectual property rights and ownership.",
    "This clause outlines the limitations of liability for both parties.",
];

const RISKS: &[RiskLevel] = &[RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

const ANSWERS: &[&str] = &[
    "Based on the document, the termination notice period is 30 days.",
    "The document specifies that payments are due within 15 days of invoice.",
    "According to section 4.2, confidential information must be protected for 3 years after termination.",
    "The liability is limited to the amount paid under this agreement.",
    "The governing law specified in the document is the state of California.",
];

#[derive(Debug, Clone, Default)]
pub struct StubProvider;

impl StubProvider {
    pub fn new() -> Self {
        Self
    }
}

/// Stable index into a table of `len` entries, derived from `text` and a salt
fn pick(text: &str, salt: u8, len: usize) -> usize {
    let mut hasher = Sha256::new();
    hasher.update([salt]);
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let value = u64::from_be_bytes([
        digest[0], digest[1], digest[2], digest[3], digest[4], digest[5], digest[6], digest[7],
    ]);
    (value % len as u64) as usize
}

#[async_trait]
impl AnalysisProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn summarize(&self, _text: &str) -> Result<String> {
        Ok(DOCUMENT_SUMMARY.to_string())
    }

    async fn analyze_clause(&self, clause_text: &str) -> Result<ClauseAnalysis> {
        let summary = CLAUSE_SUMMARIES[pick(clause_text, 0, CLAUSE_SUMMARIES.len())];
        let risk = RISKS[pick(clause_text, 1, RISKS.len())];
        debug!(risk = %risk, "Stub clause analysis");

        Ok(ClauseAnalysis {
            summary: summary.to_string(),
            risk,
        })
    }

    async fn answer(&self, question: &str, _document_text: &str) -> Result<String> {
        Ok(ANSWERS[pick(question, 2, ANSWERS.len())].to_string())
    }
}

#[async_trait]
impl Translator for StubProvider {
    /// Returns the text unchanged
    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        debug!(target_language, "Stub translation passthrough");
        Ok(text.to_string())
    }
}
