//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its form state and runs one auth flow; shared rendering
//! lives in `components`. Flow results are applied through [`apply_outcome`]
//! and [`report_failure`] so every page reports the same way.

pub mod change_password;
pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod projects;
pub mod reset_password;

use leptos_router::NavigateOptions;
use session::{Flow, FlowError, Outcome};

use crate::state::notice::NoticeState;

/// Show the outcome's notice and follow its redirect.
pub(crate) fn apply_outcome<F>(outcome: Outcome, notices: NoticeState, navigate: &F)
where
    F: Fn(&str, NavigateOptions),
{
    if let Some(notice) = outcome.notice {
        notices.show(notice);
    }
    if let Some(route) = outcome.redirect {
        navigate(&route.path(), NavigateOptions::default());
    }
}

/// Show the failure notice for `flow`.
///
/// On a 401 the gateway has already queued a redirect to the login route.
/// That redirect is followed in-app, so this notice stays on screen.
pub(crate) fn report_failure(flow: Flow, err: &FlowError, notices: NoticeState) {
    log::debug!("{flow:?} failed: {err}");
    notices.show(flow.failure_notice(err));
}
