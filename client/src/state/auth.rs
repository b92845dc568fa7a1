//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`AuthContext`] is provided at the app root. It owns the auth flows
//! (and through them the gateway and session store) plus a signal mirroring
//! the store, so route guards and user-aware components re-render when the
//! session changes from anywhere, including a 401 purge inside the gateway.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;
use session::{AuthFlows, Gateway, RouteGuard, Session, SessionStore};

use crate::net::http::GlooTransport;
use crate::util::auth::RouterNavigator;
use crate::util::config::AppConfig;
use crate::util::storage::LocalStorageBackend;

#[derive(Clone)]
pub struct AuthContext {
    pub flows: AuthFlows,
    pub guard: RouteGuard,
    /// Reactive mirror of the session store.
    pub session: RwSignal<Session>,
    /// Redirects queued by the gateway.
    pub navigator: RouterNavigator,
}

impl AuthContext {
    /// Wire the store to `localStorage` and the gateway to the network.
    pub fn browser(config: &AppConfig) -> Self {
        let navigator = RouterNavigator::default();
        let store = SessionStore::open(LocalStorageBackend);
        let gateway = Gateway::new(store, Arc::new(GlooTransport::new(config)), Arc::new(navigator));
        Self::new(AuthFlows::new(gateway), navigator)
    }

    /// `navigator` must be the one the flows' gateway redirects through.
    pub fn new(flows: AuthFlows, navigator: RouterNavigator) -> Self {
        let store = flows.store().clone();
        let session = RwSignal::new(store.load());
        store.watch(move |next| session.set(next.clone()));
        Self { guard: RouteGuard::new(store), flows, session, navigator }
    }

    pub fn store(&self) -> &SessionStore {
        self.flows.store()
    }
}

/// The app-wide auth context.
///
/// # Panics
///
/// Panics when called outside the [`crate::app::App`] tree.
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
