use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{Method, header};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler::{self, AppState};

/// Build the axum router with the merge and health endpoints.
pub fn build_router(config: ServerConfig) -> Router {
    let n_body_limit = config.max_upload_bytes;
    let route_merge = config.route_merge.clone();

    Router::new()
        .route(&route_merge, post(handler::merge_handler))
        .route("/health", get(handler::health_handler))
        .layer(DefaultBodyLimit::max(n_body_limit))
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(config))
}

/// Any origin; `POST`/`OPTIONS`; `Content-Type` request header.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
