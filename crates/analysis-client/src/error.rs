//! Error types for analysis providers.

use thiserror::Error;

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Analysis provider errors.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Configuration error (invalid settings, client construction)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, blocked prompt, empty candidates)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}
