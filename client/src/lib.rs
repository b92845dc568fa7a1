//! # client
//!
//! Leptos + WASM admin client for the IT management backend.
//!
//! This crate renders the login, password and dashboard screens and wires
//! the browser into the `session` crate: `localStorage` as the session
//! backend, `gloo-net` as the transport and `window.location` as the
//! navigator for forced redirects.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
