//! Networking for the browser client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` implements the gateway's transport over `fetch`; pages never call
//! it directly.

pub mod http;
