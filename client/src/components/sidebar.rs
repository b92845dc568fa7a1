//! Sidebar navigation shared by every restricted page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shows the menu, highlights the active route, and owns the logout control.
//! Logout is best-effort server-side and always ends on the login route.

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use session::Route;

use crate::state::auth::use_auth;

/// One sidebar link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub route: Route,
}

pub fn menu_items() -> Vec<MenuItem> {
    vec![
        MenuItem { label: "Dashboard", route: Route::Dashboard },
        MenuItem { label: "Projects", route: Route::Projects },
        MenuItem { label: "Change password", route: Route::ChangePassword },
    ]
}

/// Whether `item` should be highlighted for the current location.
///
/// The dashboard entry also covers the admin dashboard.
pub fn is_active(item: &MenuItem, pathname: &str) -> bool {
    match Route::parse(pathname) {
        Some(Route::AdminDashboard) => item.route == Route::Dashboard,
        Some(current) => current == item.route,
        None => false,
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();
    let logging_out = RwSignal::new(false);

    let flows = auth.flows.clone();
    let on_logout = move |_| {
        if logging_out.get_untracked() {
            return;
        }
        logging_out.set(true);
        let flows = flows.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let outcome = flows.logout().await;
            logging_out.set(false);
            if let Some(route) = outcome.redirect {
                navigate(&route.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
            }
        });
    };

    let greeting = move || auth.session.with(|s| s.user.as_ref().map(session::UserProfile::display_name));

    view! {
        <aside class="sidebar">
            <div class="sidebar__brand">"IT Management"</div>
            <Show when=move || greeting().is_some()>
                <p class="sidebar__user">{move || greeting().unwrap_or_default()}</p>
            </Show>
            <nav class="sidebar__menu">
                {menu_items()
                    .into_iter()
                    .map(|item| {
                        let href = item.route.path();
                        let label = item.label;
                        let active = move || location.pathname.with(|path| is_active(&item, path));
                        view! {
                            <a href=href class="sidebar__link" class:sidebar__link--active=active>
                                {label}
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>
            <button
                class="btn sidebar__logout"
                on:click=on_logout
                disabled=move || logging_out.get()
            >
                {move || if logging_out.get() { "Logging out..." } else { "Logout" }}
            </button>
        </aside>
    }
}
