//! Single outbound pipeline for every backend call.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages never talk to a transport directly. Every request goes through
//! [`Gateway::send`], which attaches the stored access token and reacts to
//! authorization failures before the caller sees the result.
//!
//! ERROR HANDLING
//! ==============
//! A 401 from any endpoint purges the session store and redirects to the
//! login route, then still returns [`GatewayError::AuthExpired`] to the
//! caller. Other failures pass through untouched. Nothing is retried.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{GatewayError, TransportError};
use crate::route::Route;
use crate::store::SessionStore;

/// Maximum number of error body characters surfaced to the user.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
        }
    }
}

/// Whether a request carries the stored bearer token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Endpoint works without credentials; no token is ever attached.
    Public,
    /// Token attached when one is stored.
    Bearer,
}

/// A request as handed to the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct OutboundRequest {
    pub method: Method,
    /// Path relative to the configured API base, e.g. `/login/`.
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub access: Access,
    /// Filled in by the gateway at dispatch time.
    pub bearer: Option<String>,
}

impl OutboundRequest {
    /// JSON `POST` request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Encode`] if `body` cannot be serialized.
    pub fn post<B: Serialize>(path: impl Into<String>, body: &B, access: Access) -> Result<Self, TransportError> {
        let body = serde_json::to_value(body).map_err(|err| TransportError::Encode(err.to_string()))?;
        Ok(Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
            access,
            bearer: None,
        })
    }

    /// Value of the `Authorization` header, if one should be sent.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {token}"))
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Decode`] when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        serde_json::from_str(&self.body).map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

/// Moves an [`OutboundRequest`] over the wire.
///
/// Implementations own base-URL resolution and timeouts. Futures need not be
/// `Send`: the client runs on a single-threaded event loop.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: &OutboundRequest) -> Result<RawResponse, TransportError>;
}

/// Reacts to forced redirects issued by the gateway.
pub trait Navigator {
    fn redirect(&self, route: &Route);
}

/// The request pipeline shared by every flow and page.
#[derive(Clone)]
pub struct Gateway {
    store: SessionStore,
    transport: Arc<dyn Transport + Send + Sync>,
    navigator: Arc<dyn Navigator + Send + Sync>,
}

impl Gateway {
    pub fn new(
        store: SessionStore,
        transport: Arc<dyn Transport + Send + Sync>,
        navigator: Arc<dyn Navigator + Send + Sync>,
    ) -> Self {
        Self { store, transport, navigator }
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Dispatch `request` exactly once.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::AuthExpired`] on 401, after the store was cleared
    ///   and the navigator sent to [`Route::Login`].
    /// - [`GatewayError::Rejected`] on any other non-2xx status.
    /// - [`GatewayError::Transport`] when no response arrived.
    pub async fn send(&self, mut request: OutboundRequest) -> Result<RawResponse, GatewayError> {
        request.bearer = match request.access {
            Access::Bearer => self.store.access_token(),
            Access::Public => None,
        };
        log::debug!(
            "{} {} (bearer: {})",
            request.method.as_str(),
            request.path,
            request.bearer.is_some()
        );

        let response = self.transport.send(&request).await.map_err(|err| {
            log::warn!("{} {} failed: {err}", request.method.as_str(), request.path);
            GatewayError::Transport(err)
        })?;

        if response.status == 401 {
            log::warn!("{} returned 401, purging session", request.path);
            self.expire_session();
            return Err(GatewayError::AuthExpired);
        }
        if !response.is_success() {
            return Err(GatewayError::Rejected {
                status: response.status,
                message: extract_error_message(&response.body),
            });
        }
        Ok(response)
    }

    /// `POST` a JSON body and decode a JSON response.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`]; additionally [`GatewayError::Decode`].
    pub async fn post_json<B, T>(&self, path: &str, body: &B, access: Access) -> Result<T, GatewayError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = OutboundRequest::post(path, body, access)?;
        self.send(request).await?.json()
    }

    /// `POST` a JSON body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// See [`Gateway::send`].
    pub async fn post<B: Serialize>(&self, path: &str, body: &B, access: Access) -> Result<(), GatewayError> {
        let request = OutboundRequest::post(path, body, access)?;
        self.send(request).await.map(|_| ())
    }

    fn expire_session(&self) {
        if let Err(err) = self.store.clear() {
            log::error!("failed to clear session storage after 401: {err}");
        }
        self.navigator.redirect(&Route::Login);
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks for `error`, then `detail`, then the first message of a
/// field-keyed validation body. Plain-text bodies are used as-is.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let message = match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["error", "detail"]
            .iter()
            .find_map(|key| map.get(*key).and_then(serde_json::Value::as_str).map(str::to_owned))
            .or_else(|| map.values().find_map(first_field_message)),
        Ok(_) => None,
        Err(_) if trimmed.starts_with('<') => None,
        Err(_) => Some(trimmed.to_owned()),
    }?;
    let message = message.trim();
    (!message.is_empty()).then(|| message.chars().take(MAX_ERROR_CHARS).collect())
}

fn first_field_message(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(message) => Some(message.clone()),
        serde_json::Value::Array(items) => items.iter().find_map(|item| item.as_str().map(str::to_owned)),
        _ => None,
    }
}
