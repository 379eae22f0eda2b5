//! Error types for the LegisLens server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use text_extract::ExtractError;
use thiserror::Error;

use crate::pipeline::PipelineError;
use crate::state::DocumentReplaced;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Could not read document: {0}")]
    Extraction(#[from] ExtractError),

    #[error("No document uploaded")]
    NoDocument,

    #[error("Clause {0} not found")]
    ClauseNotFound(String),

    #[error(transparent)]
    DocumentReplaced(#[from] DocumentReplaced),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ServerError::Extraction(_) => (StatusCode::BAD_REQUEST, "EXTRACTION_FAILED"),
            ServerError::NoDocument => (StatusCode::BAD_REQUEST, "NO_DOCUMENT"),
            ServerError::ClauseNotFound(_) => (StatusCode::NOT_FOUND, "CLAUSE_NOT_FOUND"),
            ServerError::DocumentReplaced(_) => (StatusCode::CONFLICT, "DOCUMENT_REPLACED"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for ServerError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::ClauseNotFound(id) => ServerError::ClauseNotFound(id.to_string()),
        }
    }
}
