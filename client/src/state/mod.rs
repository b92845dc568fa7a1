//! Reactive state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` mirrors the session store for guards and user-aware components;
//! `notice` carries the success/error banner every page reports through.

pub mod auth;
pub mod notice;
