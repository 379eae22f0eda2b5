//! API handlers for the LegisLens server
//!
//! Provides REST endpoints for:
//! - Document upload and analysis
//! - Per-clause (re-)analysis
//! - Question answering
//! - Translation of display strings
//! - Report export

use axum::{
    extract::{Multipart, Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use shared_types::Clause;
use tracing::{debug, info};

use crate::error::ServerError;
use crate::report::{render_report, REPORT_FILENAME};
use crate::state::AppState;

/// Largest batch accepted by the bulk translation endpoint
pub const MAX_BULK_TEXTS: usize = 200;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub provider: &'static str,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "legislens-server",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.pipeline.provider_name(),
    })
}

/// Upload response
#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub document_id: String,
    pub filename: Option<String>,
    pub summary: String,
    pub clauses: Vec<Clause>,
    pub clause_count: usize,
}

/// Handler: POST /upload
///
/// Expects a multipart form with a `file` field holding a .pdf or .docx.
/// The current document is replaced only after extraction and analysis
/// have finished.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ServerError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::InvalidRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServerError::InvalidRequest(e.to_string()))?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| ServerError::InvalidRequest("No file part".into()))?;

    if filename.trim().is_empty() {
        return Err(ServerError::InvalidRequest("No selected file".into()));
    }

    info!(filename = %filename, bytes = bytes.len(), "Upload received");

    // PDF parsing is CPU-bound
    let name = filename.clone();
    let text = tokio::task::spawn_blocking(move || text_extract::extract_text(&name, &bytes))
        .await
        .map_err(|e| ServerError::Internal(format!("Extraction task failed: {}", e)))??;

    let document = state.pipeline.process(text, Some(filename)).await;
    let document = state.documents.replace(document).await;

    let message = if document.has_clauses() {
        "File processed successfully".to_string()
    } else {
        "File processed successfully. No clauses detected.".to_string()
    };

    Ok(Json(UploadResponse {
        message,
        document_id: document.id.clone(),
        filename: document.filename.clone(),
        summary: document.summary.clone(),
        clauses: document.clauses.clone(),
        clause_count: document.clauses.len(),
    }))
}

#[derive(Deserialize, Default)]
pub struct AnalyzeParams {
    /// Re-run analysis even when the clause already has a result
    #[serde(default)]
    pub force: bool,
}

/// Handler: GET /analyze_clause/:id
pub async fn handle_analyze_clause(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<Clause>, ServerError> {
    // Negative or non-numeric ids can never name a clause
    let not_found = || ServerError::ClauseNotFound(raw_id.clone());
    let id: usize = raw_id.parse().map_err(|_| not_found())?;

    let document = state.documents.snapshot().await.ok_or_else(not_found)?;
    let clause = document.clause(id).ok_or_else(not_found)?;
    if clause.is_analyzed() && !params.force {
        debug!(clause_id = id, "Returning cached clause analysis");
        return Ok(Json(clause.clone()));
    }

    info!(clause_id = id, force = params.force, "Analyzing clause");
    let clause = state.pipeline.reanalyze(&document, id).await?;
    state
        .documents
        .update_clause(&document.id, clause.clone())
        .await?;

    Ok(Json(clause))
}

#[derive(Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Handler: POST /ask
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ServerError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(ServerError::InvalidRequest("No question provided".into()));
    }

    let document = state
        .documents
        .snapshot()
        .await
        .ok_or(ServerError::NoDocument)?;

    debug!(question, "Answering question");
    let answer = state.pipeline.answer(question, &document).await;

    Ok(Json(AskResponse { answer }))
}

#[derive(Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub target_language: String,
}

#[derive(Serialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub target_language: String,
}

/// Handler: POST /translate
pub async fn handle_translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ServerError> {
    if req.text.is_empty() {
        return Err(ServerError::InvalidRequest("Missing 'text'".into()));
    }
    let target_language = required_language(&req.target_language)?;

    let translated_text = state.pipeline.translate(&req.text, target_language).await;

    Ok(Json(TranslateResponse {
        translated_text,
        target_language: target_language.to_string(),
    }))
}

#[derive(Deserialize)]
pub struct TranslateBulkRequest {
    #[serde(default)]
    pub texts: Vec<String>,
    #[serde(default)]
    pub target_language: String,
}

#[derive(Serialize)]
pub struct TranslateBulkResponse {
    pub translations: Vec<String>,
    pub target_language: String,
}

/// Handler: POST /translate_bulk
pub async fn handle_translate_bulk(
    State(state): State<AppState>,
    Json(req): Json<TranslateBulkRequest>,
) -> Result<Json<TranslateBulkResponse>, ServerError> {
    let target_language = required_language(&req.target_language)?.to_string();

    if req.texts.len() > MAX_BULK_TEXTS {
        return Err(ServerError::InvalidRequest(format!(
            "At most {} texts per request",
            MAX_BULK_TEXTS
        )));
    }

    let translations = state
        .pipeline
        .translate_all(req.texts, &target_language)
        .await;

    Ok(Json(TranslateBulkResponse {
        translations,
        target_language,
    }))
}

/// Handler: GET /export
pub async fn handle_export(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
    let document = state
        .documents
        .snapshot()
        .await
        .ok_or(ServerError::NoDocument)?;

    let report = render_report(&document, chrono::Utc::now());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REPORT_FILENAME),
            ),
        ],
        report,
    ))
}

fn required_language(target_language: &str) -> Result<&str, ServerError> {
    let target_language = target_language.trim();
    if target_language.is_empty() {
        return Err(ServerError::InvalidRequest(
            "Missing 'target_language'".into(),
        ));
    }
    Ok(target_language)
}
