//! Access check evaluated before a restricted view is built.
//!
//! The guard keeps no memory of earlier decisions; every navigation asks the
//! store again.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::route::Route;
use crate::store::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allowed,
    Denied,
}

impl GuardDecision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        self == Self::Allowed
    }

    /// Where a denied visitor is sent.
    #[must_use]
    pub fn redirect(self) -> Option<Route> {
        match self {
            Self::Allowed => None,
            Self::Denied => Some(Route::Login),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RouteGuard {
    store: SessionStore,
}

impl RouteGuard {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Decision for a restricted view.
    #[must_use]
    pub fn check(&self) -> GuardDecision {
        if self.store.is_authenticated() { GuardDecision::Allowed } else { GuardDecision::Denied }
    }

    /// Decision for any route; entry routes are always allowed.
    #[must_use]
    pub fn check_route(&self, route: &Route) -> GuardDecision {
        if route.is_restricted() { self.check() } else { GuardDecision::Allowed }
    }
}
