//! Google Gemini client implementing the analysis and translation capabilities

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared_types::ClauseAnalysis;
use tracing::{debug, warn};

use crate::error::{AnalysisError, Result};
use crate::prompts::{
    clause_prompt, parse_clause_response, question_prompt, summary_prompt, translation_prompt,
};
use crate::provider::{AnalysisProvider, Translator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// generateContent request body
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

impl GenerateRequest {
    /// Single-turn request carrying one user prompt
    pub fn user(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// generateContent response body (fields we use)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    pub fn text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AnalysisError::Api(format!("Prompt blocked: {}", reason)));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::Api("No candidates in Gemini response".into()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AnalysisError::Api(format!(
                "Empty Gemini response (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

/// Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client with a per-request timeout.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (proxies, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Send one prompt and return the model's text reply.
    pub async fn generate(&self, prompt: String) -> Result<String> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest::user(prompt))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                AnalysisError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(AnalysisError::Api(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Parse(e.to_string()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );

        body.text()
    }
}

#[async_trait]
impl AnalysisProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        self.generate(summary_prompt(text)).await
    }

    async fn analyze_clause(&self, clause_text: &str) -> Result<ClauseAnalysis> {
        let reply = self.generate(clause_prompt(clause_text)).await?;
        Ok(parse_clause_response(&reply))
    }

    async fn answer(&self, question: &str, document_text: &str) -> Result<String> {
        self.generate(question_prompt(question, document_text)).await
    }
}

#[async_trait]
impl Translator for GeminiClient {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let reply = self
            .generate(translation_prompt(text, target_language))
            .await?;
        Ok(reply.trim().to_string())
    }
}
