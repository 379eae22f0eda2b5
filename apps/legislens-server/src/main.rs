//! LegisLens Server
//!
//! Turns uploaded contracts, leases and agreements into plain-language
//! clause summaries with risk ratings. Provides REST API endpoints for:
//!
//! - Document upload (PDF/DOCX), summary and clause segmentation
//! - Per-clause analysis and re-analysis
//! - Questions about the current document
//! - Translation of titles, summaries and answers
//! - Plain-text report export
//!
//! ## Architecture
//!
//! Handlers are a thin layer over [`pipeline::DocumentPipeline`]. The
//! analysis provider (Gemini or an offline stub) is chosen once at startup
//! and the current document lives in a [`state::DocumentSlot`] shared via
//! axum state.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use analysis_client::{gemini, ProviderConfig, Providers};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::map_response_body::MapResponseBodyLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod pipeline;
mod report;
mod state;

use api::{
    handle_analyze_clause, handle_ask, handle_export, handle_health, handle_translate,
    handle_translate_bulk, handle_upload,
};
use pipeline::{DocumentPipeline, PipelineConfig};
use state::AppState;

/// Command-line arguments for the LegisLens server
#[derive(Parser, Debug)]
#[command(name = "legislens-server")]
#[command(about = "LegisLens legal document analysis server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Gemini API key; without one the canned stub provider is used
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = gemini::DEFAULT_MODEL)]
    gemini_model: String,

    /// Gemini REST base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = gemini::DEFAULT_BASE_URL)]
    gemini_base_url: String,

    /// Timeout for each analysis or translation call, in milliseconds
    #[arg(long, default_value = "30000")]
    analysis_timeout_ms: u64,

    /// Clause analyses run concurrently per upload
    #[arg(long, default_value = "4")]
    analysis_concurrency: usize,

    /// Maximum request body size in megabytes
    #[arg(long, default_value = "20")]
    max_upload_mb: usize,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build the application router without rate limiting
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // Document endpoints
        .route("/upload", post(handle_upload))
        .route("/analyze_clause/:id", get(handle_analyze_clause))
        .route("/ask", post(handle_ask))
        .route("/export", get(handle_export))
        // Translation
        .route("/translate", post(handle_translate))
        .route("/translate_bulk", post(handle_translate_bulk))
        // Apply middleware
        .layer(DefaultBodyLimit::disable())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(MapResponseBodyLayer::new(axum::body::Body::new))
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LegisLens server on {}:{}", args.host, args.port);

    let analysis_timeout = Duration::from_millis(args.analysis_timeout_ms);

    let providers = Providers::from_config(&ProviderConfig {
        api_key: args.gemini_api_key.clone(),
        model: args.gemini_model.clone(),
        base_url: args.gemini_base_url.clone(),
        request_timeout: analysis_timeout,
    })?;

    let pipeline = DocumentPipeline::new(
        providers,
        PipelineConfig {
            analysis_timeout,
            concurrency: args.analysis_concurrency,
        },
    );
    let state = AppState::new(pipeline);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit.saturating_mul(2))
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limit: {}", args.rate_limit))?,
    );

    let app = router(state, args.max_upload_mb * 1024 * 1024).layer(GovernorLayer {
        config: governor_conf,
    });

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Analysis timeout: {}ms", args.analysis_timeout_ms);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
