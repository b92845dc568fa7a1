//! Static host for the IT management client.
//!
//! Serves the Trunk-built bundle from `ITDESK_DIST_DIR` with an `index.html`
//! fallback so deep links like `/reset-password/:uid/:token` reach the SPA.

mod config;
mod error;
mod routes;

use tracing_subscriber::EnvFilter;

use crate::config::HostConfig;
use crate::error::HostError;

#[tokio::main]
async fn main() -> Result<(), HostError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = HostConfig::from_env()?;
    if !config.index_file().is_file() {
        tracing::warn!(dist = %config.dist_dir.display(), "index.html not found; build the client with trunk first");
    }

    let app = routes::app(&config);
    let listener = tokio::net::TcpListener::bind(config.socket_addr())
        .await
        .map_err(|source| HostError::Bind { addr: config.socket_addr(), source })?;

    tracing::info!(addr = %config.socket_addr(), dist = %config.dist_dir.display(), "itdesk listening");
    axum::serve(listener, app).await.map_err(HostError::Serve)
}
