//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::layout::AppLayout;
use crate::components::notice_banner::NoticeBanner;
use crate::pages::{
    change_password::ChangePasswordPage, dashboard::DashboardPage, forgot_password::ForgotPasswordPage,
    login::LoginPage, projects::ProjectsPage, reset_password::ResetPasswordPage,
};
use crate::state::auth::AuthContext;
use crate::state::notice::NoticeState;
use crate::util::auth::{GatewayRedirects, RequireAuth};
use crate::util::config::AppConfig;

/// Root application component.
///
/// Opens the session store once, provides it to every route, and places
/// every restricted page behind [`RequireAuth`].
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::load();
    provide_context(AuthContext::browser(&config));
    provide_context(NoticeState::default());
    provide_context(config);

    view! {
        <Title text="IT Management"/>

        <Router>
            <GatewayRedirects/>
            <NoticeBanner/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LoginPage/>
                <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                <Route
                    path=(StaticSegment("reset-password"), ParamSegment("uid"), ParamSegment("token"))
                    view=ResetPasswordPage
                />
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <RequireAuth><AppLayout><DashboardPage admin=false/></AppLayout></RequireAuth> }
                />
                <Route
                    path=StaticSegment("admin-dashboard")
                    view=|| view! { <RequireAuth><AppLayout><DashboardPage admin=true/></AppLayout></RequireAuth> }
                />
                <Route
                    path=StaticSegment("projects")
                    view=|| view! { <RequireAuth><AppLayout><ProjectsPage/></AppLayout></RequireAuth> }
                />
                <Route
                    path=StaticSegment("change-password")
                    view=|| view! { <RequireAuth><AppLayout><ChangePasswordPage/></AppLayout></RequireAuth> }
                />
            </Routes>
        </Router>
    }
}
