//! Error types for the store, gateway and flow layers.
//!
//! ERROR HANDLING
//! ==============
//! Each layer wraps the one beneath it. A flow caller only ever matches on
//! [`FlowError`]; gateway callers match on [`GatewayError`] and must treat
//! [`GatewayError::AuthExpired`] as "the session is already gone".

/// Failure writing to the durable session backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("session storage unavailable")]
    Unavailable,
    #[error("failed to write `{key}` to session storage: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode user profile: {0}")]
    Encode(String),
}

/// Failure below HTTP: the request never produced a status code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("unable to reach the server: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("failed to build request: {0}")]
    Encode(String),
}

/// Result of a call routed through the [`Gateway`](crate::Gateway).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The backend answered 401. The session has been purged and the client
    /// redirected before this error was returned.
    #[error("session expired")]
    AuthExpired,
    /// Any other non-2xx answer. `message` is the backend's own error text
    /// when the body carried one.
    #[error("request failed ({status})")]
    Rejected { status: u16, message: Option<String> },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Backend-supplied message, if the failure carried one.
    #[must_use]
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Failure of an authentication flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(&'static str),
    #[error("You are already logged in.")]
    AlreadyAuthenticated,
    /// A logout happened while this flow's request was in flight; its
    /// response was discarded.
    #[error("session changed while the request was in flight")]
    Superseded,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
