//! HTTP boundary around the analysis engine.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Liveness probe |
//! | POST | `/analyze-query` | Errors, warnings and optimized query |
//! | POST | `/format-query` | Reformatted statement |
//! | POST | `/query-complexity` | Table/join/condition/subquery counts |
//!
//! POST bodies are `{"query": "<statement>"}`. Unknown routes answer 404 and
//! panics inside the stack answer a generic 500.

mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post}
};
pub use handlers::{ApiError, ErrorResponse, FormatResponse, HealthResponse};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer
};

use crate::{
    config::ServerConfig,
    engine::Analyzer,
    error::{AppResult, server_error}
};

/// Shared state for request handlers
pub struct AppState {
    pub analyzer:     Analyzer,
    pub service_name: String
}

impl AppState {
    pub fn new(analyzer: Analyzer, service_name: impl Into<String>) -> Self {
        Self {
            analyzer,
            service_name: service_name.into()
        }
    }
}

/// Create the router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/analyze-query", post(handlers::analyze_query))
        .route("/format-query", post(handlers::format_sql))
        .route("/query-complexity", post(handlers::complexity))
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until interrupted
///
/// # Errors
///
/// Returns error if the address cannot be bound or the server fails.
pub async fn serve(config: &ServerConfig, analyzer: Analyzer) -> AppResult<()> {
    let state = Arc::new(AppState::new(analyzer, config.service_name.clone()));
    let router = create_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| server_error(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("SQL optimizer listening on {}", addr);
    tracing::info!("   POST /analyze-query    - Analyze and optimize a statement");
    tracing::info!("   POST /format-query     - Format a statement");
    tracing::info!("   POST /query-complexity - Count tables, joins and subqueries");
    tracing::info!("   GET  /health           - Health check");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| server_error(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
