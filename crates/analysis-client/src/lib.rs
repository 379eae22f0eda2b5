//! Analysis Client - plain-language summaries, risk ratings, answers and translations
//!
//! The document pipeline talks to two capabilities:
//!
//! - [`AnalysisProvider`]: document summaries, per-clause summary and risk,
//!   question answering
//! - [`Translator`]: translation of display strings
//!
//! Two implementations ship here: [`GeminiClient`] (Google Gemini over REST)
//! and [`StubProvider`] (canned, deterministic, offline). [`Providers::from_config`]
//! picks between them depending on whether an API key is configured.

pub mod config;
pub mod error;
pub mod gemini;
pub mod prompts;
pub mod provider;
pub mod stub;

pub use config::{ProviderConfig, Providers};
pub use error::{AnalysisError, Result};
pub use gemini::GeminiClient;
pub use provider::{AnalysisProvider, Translator};
pub use stub::StubProvider;
