//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the page shell and shared controls while reading and
//! writing auth and notice state from Leptos context providers.

pub mod google_button;
pub mod layout;
pub mod notice_banner;
pub mod sidebar;
