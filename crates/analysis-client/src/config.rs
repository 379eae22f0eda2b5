//! Provider selection

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::Result;
use crate::gemini::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::provider::{AnalysisProvider, Translator};
use crate::stub::StubProvider;

/// Settings for building the analysis and translation providers
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Gemini API key; `None` or blank selects the offline stub
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ProviderConfig {
    fn usable_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// The providers a running service uses, chosen once at startup
#[derive(Clone)]
pub struct Providers {
    pub analysis: Arc<dyn AnalysisProvider>,
    pub translator: Arc<dyn Translator>,
}

impl Providers {
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        match config.usable_key() {
            Some(key) => {
                let client = Arc::new(
                    GeminiClient::new(key, config.request_timeout)?
                        .with_model(config.model.clone())
                        .with_base_url(config.base_url.clone()),
                );
                info!(model = %client.model(), "Using Gemini analysis provider");
                Ok(Self {
                    analysis: client.clone(),
                    translator: client,
                })
            }
            None => {
                warn!("No Gemini API key configured; using canned stub analysis");
                Ok(Self::stub())
            }
        }
    }

    pub fn stub() -> Self {
        let stub = Arc::new(StubProvider::new());
        Self {
            analysis: stub.clone(),
            translator: stub,
        }
    }
}
