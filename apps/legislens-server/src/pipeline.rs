//! Document pipeline: summary, segmentation and per-clause analysis
//!
//! Collaborator failures never abort a run. A failed document summary or
//! clause analysis becomes a placeholder string on the affected field and the
//! rest of the document is processed as usual.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use analysis_client::{AnalysisProvider, Providers, Translator};
use clause_engine::ClauseSegmenter;
use futures::stream::{self, StreamExt};
use shared_types::{Clause, ClauseAnalysis, LegalDocument};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Clause {0} not found in the current document")]
    ClauseNotFound(usize),
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on every provider call
    pub analysis_timeout: Duration,
    /// Clause analyses in flight at once
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            analysis_timeout: Duration::from_secs(30),
            concurrency: 4,
        }
    }
}

pub struct DocumentPipeline {
    segmenter: ClauseSegmenter,
    analysis: Arc<dyn AnalysisProvider>,
    translator: Arc<dyn Translator>,
    config: PipelineConfig,
}

impl DocumentPipeline {
    pub fn new(providers: Providers, config: PipelineConfig) -> Self {
        Self {
            segmenter: ClauseSegmenter::new(),
            analysis: providers.analysis,
            translator: providers.translator,
            config,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.analysis.name()
    }

    /// Build a fully analyzed document from extracted text.
    pub async fn process(&self, raw_text: String, filename: Option<String>) -> LegalDocument {
        let start = Instant::now();
        let mut document = LegalDocument::new(raw_text, filename);

        document.summary = self.summarize(&document.full_text).await;

        let clauses = self.segmenter.segment(&document.full_text);
        debug!(clause_count = clauses.len(), "Segmented document");
        document.clauses = self.analyze_all(clauses).await;

        info!(
            document_id = %document.id,
            clause_count = document.clauses.len(),
            duration_ms = start.elapsed().as_millis(),
            "Document processed"
        );

        document
    }

    /// Analyze clause `id` of `document` again.
    ///
    /// The returned clause carries fresh `summary` and `risk`; storing it is
    /// up to the caller.
    pub async fn reanalyze(
        &self,
        document: &LegalDocument,
        id: usize,
    ) -> Result<Clause, PipelineError> {
        let clause = document
            .clause(id)
            .cloned()
            .ok_or(PipelineError::ClauseNotFound(id))?;

        Ok(self.analyzed(clause).await)
    }

    pub async fn answer(&self, question: &str, document: &LegalDocument) -> String {
        match self
            .bounded(self.analysis.answer(question, &document.full_text))
            .await
        {
            Ok(answer) => answer,
            Err(reason) => {
                warn!(%reason, "Question answering failed");
                format!("I'm sorry, I couldn't process your question: {}", reason)
            }
        }
    }

    /// Translate `text`, falling back to the source text on any failure
    pub async fn translate(&self, text: &str, target_language: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        match self
            .bounded(self.translator.translate(text, target_language))
            .await
        {
            Ok(translated) => translated,
            Err(reason) => {
                warn!(%reason, target_language, "Translation failed, returning source text");
                text.to_string()
            }
        }
    }

    /// Translate a batch, preserving order
    pub async fn translate_all(&self, texts: Vec<String>, target_language: &str) -> Vec<String> {
        stream::iter(texts)
            .map(|text| async move { self.translate(&text, target_language).await })
            .buffered(self.concurrency())
            .collect()
            .await
    }

    async fn summarize(&self, text: &str) -> String {
        match self.bounded(self.analysis.summarize(text)).await {
            Ok(summary) => summary,
            Err(reason) => {
                warn!(%reason, "Document summary failed");
                format!("Unable to generate summary: {}", reason)
            }
        }
    }

    async fn analyze_all(&self, clauses: Vec<Clause>) -> Vec<Clause> {
        stream::iter(clauses)
            .map(|clause| self.analyzed(clause))
            .buffered(self.concurrency())
            .collect()
            .await
    }

    async fn analyzed(&self, mut clause: Clause) -> Clause {
        let analysis = match self
            .bounded(self.analysis.analyze_clause(&clause.content))
            .await
        {
            Ok(analysis) => analysis,
            Err(reason) => {
                warn!(clause_id = clause.id, %reason, "Clause analysis failed");
                ClauseAnalysis::failed(reason)
            }
        };

        clause.apply_analysis(analysis);
        clause
    }

    /// Run a provider call under the analysis timeout, flattening failures
    /// into a reason string
    async fn bounded<T, F>(&self, call: F) -> Result<T, String>
    where
        F: Future<Output = analysis_client::Result<T>>,
    {
        match tokio::time::timeout(self.config.analysis_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!(
                "timed out after {}ms",
                self.config.analysis_timeout.as_millis()
            )),
        }
    }

    fn concurrency(&self) -> usize {
        self.config.concurrency.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_client::{AnalysisError, StubProvider};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use shared_types::RiskLevel;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const LEASE: &str = "LEASE AGREEMENT\n\
        ARTICLE 1. RENT\n\
        Tenant shall pay Landlord the sum of $1,500 on the first day of each month.\n\
        ARTICLE 2. TERM\n\
        This lease begins on January 1 and ends twelve months later unless renewed.\n";

    /// Provider whose every call fails
    struct FailingProvider;

    #[async_trait]
    impl AnalysisProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn summarize(&self, _text: &str) -> analysis_client::Result<String> {
            Err(AnalysisError::Network("connection refused".into()))
        }

        async fn analyze_clause(&self, _text: &str) -> analysis_client::Result<ClauseAnalysis> {
            Err(AnalysisError::Api("quota exceeded".into()))
        }

        async fn answer(&self, _q: &str, _text: &str) -> analysis_client::Result<String> {
            Err(AnalysisError::Parse("bad json".into()))
        }
    }

    #[async_trait]
    impl Translator for FailingProvider {
        async fn translate(&self, _text: &str, _lang: &str) -> analysis_client::Result<String> {
            Err(AnalysisError::Network("offline".into()))
        }
    }

    /// Provider that never answers within the test timeout
    struct SlowProvider;

    #[async_trait]
    impl AnalysisProvider for SlowProvider {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn summarize(&self, _text: &str) -> analysis_client::Result<String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("late".into())
        }

        async fn analyze_clause(&self, _text: &str) -> analysis_client::Result<ClauseAnalysis> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(ClauseAnalysis {
                summary: "late".into(),
                risk: RiskLevel::Low,
            })
        }

        async fn answer(&self, _q: &str, _text: &str) -> analysis_client::Result<String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("late".into())
        }
    }

    /// Counts clause analyses and echoes the clause text back as the summary
    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AnalysisProvider for CountingProvider {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn summarize(&self, _text: &str) -> analysis_client::Result<String> {
            Ok("summary".into())
        }

        async fn analyze_clause(&self, text: &str) -> analysis_client::Result<ClauseAnalysis> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ClauseAnalysis {
                summary: format!("#{} {}", n, &text[..10]),
                risk: RiskLevel::High,
            })
        }

        async fn answer(&self, _q: &str, _text: &str) -> analysis_client::Result<String> {
            Ok("answer".into())
        }
    }

    fn pipeline_with(analysis: Arc<dyn AnalysisProvider>, timeout: Duration) -> DocumentPipeline {
        let providers = Providers {
            analysis,
            translator: Arc::new(StubProvider::new()),
        };
        DocumentPipeline::new(
            providers,
            PipelineConfig {
                analysis_timeout: timeout,
                concurrency: 2,
            },
        )
    }

    fn failing_pipeline() -> DocumentPipeline {
        let failing = Arc::new(FailingProvider);
        DocumentPipeline::new(
            Providers {
                analysis: failing.clone(),
                translator: failing,
            },
            PipelineConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_process_lease_with_stub() {
        let pipeline = DocumentPipeline::new(Providers::stub(), PipelineConfig::default());
        let document = pipeline
            .process(LEASE.to_string(), Some("lease.pdf".into()))
            .await;

        assert_eq!(document.filename.as_deref(), Some("lease.pdf"));
        assert!(!document.summary.is_empty());
        assert_eq!(document.clauses.len(), 2);
        assert_eq!(document.clauses[0].title, "RENT");
        assert_eq!(document.clauses[1].title, "TERM");
        assert!(document.clauses.iter().all(Clause::is_analyzed));
    }

    #[tokio::test]
    async fn test_failures_become_placeholders() {
        let document = failing_pipeline().process(LEASE.to_string(), None).await;

        assert_eq!(
            document.summary,
            "Unable to generate summary: Network error: connection refused"
        );
        assert_eq!(document.clauses.len(), 2);
        for clause in &document.clauses {
            assert_eq!(clause.summary, "Analysis failed: API error: quota exceeded");
            assert_eq!(clause.risk, RiskLevel::Unknown);
        }
    }

    #[tokio::test]
    async fn test_timeouts_become_placeholders() {
        let pipeline = pipeline_with(Arc::new(SlowProvider), Duration::from_millis(20));
        let document = pipeline.process(LEASE.to_string(), None).await;

        assert_eq!(document.summary, "Unable to generate summary: timed out after 20ms");
        assert!(document
            .clauses
            .iter()
            .all(|c| c.summary == "Analysis failed: timed out after 20ms"));
    }

    #[tokio::test]
    async fn test_analysis_preserves_clause_order() {
        let pipeline = pipeline_with(Arc::new(CountingProvider::default()), Duration::from_secs(5));
        let document = pipeline.process(LEASE.to_string(), None).await;

        assert!(document.clauses[0].summary.ends_with("Tenant sha"));
        assert!(document.clauses[1].summary.ends_with("This lease"));
    }

    #[tokio::test]
    async fn test_empty_text_yields_no_clauses() {
        let pipeline = DocumentPipeline::new(Providers::stub(), PipelineConfig::default());
        let document = pipeline.process("   ".to_string(), None).await;
        assert!(document.clauses.is_empty());
    }

    #[tokio::test]
    async fn test_reanalyze_overwrites() {
        let provider = Arc::new(CountingProvider::default());
        let pipeline = pipeline_with(provider.clone(), Duration::from_secs(5));
        let document = pipeline.process(LEASE.to_string(), None).await;

        let first = pipeline.reanalyze(&document, 1).await.unwrap();
        let second = pipeline.reanalyze(&document, 1).await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
        assert_ne!(first.summary, second.summary);
        assert!(second.summary.starts_with("#3 "));
        assert_eq!(second.risk, RiskLevel::High);
        assert_eq!(second.title, document.clauses[1].title);
    }

    #[tokio::test]
    async fn test_reanalyze_unknown_id() {
        let pipeline = DocumentPipeline::new(Providers::stub(), PipelineConfig::default());
        let document = pipeline.process(LEASE.to_string(), None).await;

        for _ in 0..2 {
            assert_eq!(
                pipeline.reanalyze(&document, 7).await,
                Err(PipelineError::ClauseNotFound(7))
            );
        }

        let empty = pipeline.process(String::new(), None).await;
        assert_eq!(
            pipeline.reanalyze(&empty, 0).await,
            Err(PipelineError::ClauseNotFound(0))
        );
    }

    #[tokio::test]
    async fn test_answer_failure_is_apology() {
        let pipeline = failing_pipeline();
        let document = LegalDocument::new(LEASE, None);
        let answer = pipeline.answer("When is rent due?", &document).await;
        assert_eq!(
            answer,
            "I'm sorry, I couldn't process your question: Parse error: bad json"
        );
    }

    #[tokio::test]
    async fn test_translate_falls_back_to_source() {
        let pipeline = failing_pipeline();
        assert_eq!(pipeline.translate("Rent", "fr").await, "Rent");

        let batch = pipeline
            .translate_all(vec!["a".into(), "b".into(), "c".into()], "fr")
            .await;
        assert_eq!(batch, vec!["a", "b", "c"]);
    }
}
