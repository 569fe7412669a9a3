use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers;
use crate::state::AppState;

/// Maximum accepted upload body size (100 MB); larger uploads are rejected
/// with 413 before reaching the pipeline.
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/upload", post(handlers::handle_upload))
        .route("/ask", post(handlers::handle_ask))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
        .with_state(state)
}
