//! Router assembly.

use crate::handlers;
use crate::middleware::request_context;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the full application router.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/api/generate-diagram", post(handlers::generate_diagram))
        .route("/api/modify-diagram", post(handlers::modify_diagram))
        .route("/api/undo-diagram", post(handlers::undo_diagram))
        .route("/api/regenerate-format", post(handlers::regenerate_format))
        .route("/api/execute-code", post(handlers::execute_code))
        .route("/api/validate-code", post(handlers::validate_code))
        .route("/api/completions/:provider", get(handlers::completions))
        .route("/api/diagrams/:filename", get(handlers::serve_diagram))
        .route("/api/feedback", post(handlers::submit_feedback))
        .route("/api/feedback/stats", get(handlers::feedback_stats))
        .route("/api/error-logs/:request_id", get(handlers::error_logs))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_export))
        .layer(axum::middleware::from_fn(request_context))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        tracing::info!("no CORS origins configured; CORS headers will not be added");
        return CorsLayer::new();
    }
    if allowed_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins: Vec<_> = allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
