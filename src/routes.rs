//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/healthz` answers liveness checks. Every other path is a static file from
//! the client bundle; unknown paths get `index.html` so the client router
//! can resolve them.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::HostConfig;

pub fn app(config: &HostConfig) -> Router {
    let spa = ServeDir::new(&config.dist_dir).fallback(ServeFile::new(config.index_file()));

    Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(spa)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
