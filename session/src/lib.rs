//! Client-side authentication and session lifecycle.
//!
//! This crate owns the credential set held by the admin client and every
//! path that reads or mutates it: the persisted [`SessionStore`], the
//! [`Gateway`] that all backend calls pass through, the [`RouteGuard`] that
//! gates restricted views, and the [`AuthFlows`] built on top of them.
//!
//! It has no browser dependencies. The `client` crate plugs in a
//! `localStorage` backend, a `gloo-net` transport and a location-based
//! navigator; tests plug in in-memory doubles.

pub mod error;
pub mod flows;
pub mod gateway;
pub mod guard;
pub mod model;
pub mod notice;
pub mod route;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{FlowError, GatewayError, StoreError, TransportError};
pub use flows::{AuthFlows, Flow, LoginForm, Outcome};
pub use gateway::{Access, Gateway, Method, Navigator, OutboundRequest, RawResponse, Transport};
pub use guard::{GuardDecision, RouteGuard};
pub use model::{LoginResponse, Session, UserProfile, UserRole};
pub use notice::{Notice, NoticeLevel};
pub use route::{LandingPolicy, Route};
pub use store::{Generation, MemoryBackend, SessionBackend, SessionStore};
