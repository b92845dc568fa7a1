//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every restricted route is wrapped in [`RequireAuth`] so the guard decision
//! and the unauthenticated redirect behave identically across pages.
//!
//! Gateway-forced redirects (a 401 anywhere) are queued on a
//! [`RouterNavigator`] and followed in-app by [`GatewayRedirects`]. The app
//! is never reloaded, so a failure notice raised by the same flow is still
//! on screen after the redirect.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use session::{GuardDecision, Navigator, Route};

use crate::state::auth::use_auth;

fn replace() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Path a visitor should be sent to for a guard decision, if any.
pub fn guard_redirect_path(decision: GuardDecision) -> Option<String> {
    decision.redirect().map(|route| route.path())
}

/// Render `children` only while the guard allows the current location.
///
/// The guard is asked again whenever the session signal or the location
/// changes, so a 401 purge or a logout elsewhere unmounts the page at once.
/// Unknown paths are treated as restricted.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    let guard = auth.guard.clone();
    let decision = Memo::new(move |_| {
        auth.session.track();
        location
            .pathname
            .with(|path| Route::parse(path))
            .map_or_else(|| guard.check(), |route| guard.check_route(&route))
    });

    Effect::new(move |_| {
        if let Some(path) = guard_redirect_path(decision.get()) {
            navigate(&path, replace());
        }
    });

    move || decision.get().is_allowed().then(|| children())
}

/// Navigator handed to the gateway. Redirects are queued here and followed
/// by [`GatewayRedirects`] through the router.
#[derive(Clone, Copy, Debug)]
pub struct RouterNavigator {
    pending: RwSignal<Option<Route>>,
}

impl Default for RouterNavigator {
    fn default() -> Self {
        Self { pending: RwSignal::new(None) }
    }
}

impl RouterNavigator {
    /// Navigate to the queued route, if any, and clear the queue.
    pub(crate) fn follow_pending<F>(&self, navigate: &F)
    where
        F: Fn(&str, NavigateOptions),
    {
        let Some(route) = self.pending.get() else {
            return;
        };
        self.pending.set(None);
        log::info!("following forced redirect to {}", route.path());
        navigate(&route.path(), replace());
    }
}

impl Navigator for RouterNavigator {
    fn redirect(&self, route: &Route) {
        self.pending.set(Some(route.clone()));
    }
}

/// Follows redirects queued by the gateway. Mounted once inside the router.
#[component]
pub fn GatewayRedirects() -> impl IntoView {
    let navigator = use_auth().navigator;
    let navigate = use_navigate();
    Effect::new(move |_| navigator.follow_pending(&navigate));
}
