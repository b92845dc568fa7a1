//! Browser HTTP transport for the session gateway.
//!
//! Browser build (`csr`): real requests via `gloo-net` with an abort-based
//! timeout. Any other build: every send fails with a network error, since
//! the backend is only reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Only the absence of a response is an error here. Every status code,
//! including 401 and 5xx, is returned as a [`RawResponse`] so the gateway
//! decides what it means.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use async_trait::async_trait;
use session::{OutboundRequest, RawResponse, Transport, TransportError};

use crate::util::config::AppConfig;

/// `gloo-net` transport bound to one API base URL.
#[derive(Clone, Debug)]
pub struct GlooTransport {
    config: AppConfig,
}

impl GlooTransport {
    pub fn new(config: &AppConfig) -> Self {
        Self { config: config.clone() }
    }

    fn url(&self, request: &OutboundRequest) -> String {
        self.config.build_url(&request.path)
    }
}

/// Map a fetch failure message to a transport error, detecting aborts.
#[cfg(any(test, feature = "csr"))]
fn classify_failure(message: &str) -> TransportError {
    let lowered = message.to_lowercase();
    if lowered.contains("abort") || lowered.contains("timeout") {
        TransportError::Timeout
    } else {
        TransportError::Network(message.to_owned())
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<RawResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;
            use gloo_timers::callback::Timeout;
            use session::Method;
            use web_sys::{AbortController, RequestCredentials};

            let url = self.url(request);
            let controller =
                AbortController::new().map_err(|_| TransportError::Network("abort controller unavailable".to_owned()))?;
            let signal = controller.signal();
            let _timeout = Timeout::new(self.config.request_timeout_ms, move || controller.abort());

            let mut builder = match request.method {
                Method::Post => Request::post(&url),
            }
            .credentials(RequestCredentials::Include)
            .abort_signal(Some(&signal));
            if let Some(authorization) = request.authorization() {
                builder = builder.header("Authorization", &authorization);
            }
            let built = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|err| TransportError::Encode(err.to_string()))?;

            let response = built.send().await.map_err(|err| classify_failure(&err.to_string()))?;
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Ok(RawResponse::new(status, body))
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(TransportError::Network(format!("no browser transport for {}", self.url(request))))
        }
    }
}
