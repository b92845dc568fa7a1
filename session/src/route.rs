//! Client routes and the role-based landing policy.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use crate::model::{Session, UserRole};

/// Every view the client can navigate to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Unauthenticated entry point (`/`), the login screen.
    Login,
    ForgotPassword,
    ResetPassword { uid: String, token: String },
    Dashboard,
    AdminDashboard,
    Projects,
    ChangePassword,
}

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/".to_owned(),
            Self::ForgotPassword => "/forgot-password".to_owned(),
            Self::ResetPassword { uid, token } => format!("/reset-password/{uid}/{token}"),
            Self::Dashboard => "/dashboard".to_owned(),
            Self::AdminDashboard => "/admin-dashboard".to_owned(),
            Self::Projects => "/projects".to_owned(),
            Self::ChangePassword => "/change-password".to_owned(),
        }
    }

    /// Resolve a location path. A trailing slash is ignored.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let trimmed = if trimmed.len() > 1 { trimmed.trim_end_matches('/') } else { trimmed };
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Self::Login),
            ["forgot-password"] => Some(Self::ForgotPassword),
            ["reset-password", uid, token] => Some(Self::ResetPassword {
                uid: (*uid).to_owned(),
                token: (*token).to_owned(),
            }),
            ["dashboard"] => Some(Self::Dashboard),
            ["admin-dashboard"] => Some(Self::AdminDashboard),
            ["projects"] => Some(Self::Projects),
            ["change-password"] => Some(Self::ChangePassword),
            _ => None,
        }
    }

    /// Whether the route guard must allow the view before it is rendered.
    #[must_use]
    pub fn is_restricted(&self) -> bool {
        !matches!(self, Self::Login | Self::ForgotPassword | Self::ResetPassword { .. })
    }
}

/// Role to landing-route table consulted after a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LandingPolicy {
    routes: Vec<(UserRole, Route)>,
    fallback: Route,
}

impl Default for LandingPolicy {
    /// Admins land on the admin dashboard; every other role on the dashboard.
    fn default() -> Self {
        Self::new(Route::Dashboard).with(UserRole::Admin, Route::AdminDashboard)
    }
}

impl LandingPolicy {
    /// Policy with no role-specific entries.
    #[must_use]
    pub fn new(fallback: Route) -> Self {
        Self { routes: Vec::new(), fallback }
    }

    /// Map `role` to `route`, replacing any earlier entry for that role.
    #[must_use]
    pub fn with(mut self, role: UserRole, route: Route) -> Self {
        self.routes.retain(|(existing, _)| *existing != role);
        self.routes.push((role, route));
        self
    }

    #[must_use]
    pub fn landing_for(&self, role: &UserRole) -> Route {
        self.routes
            .iter()
            .find(|(candidate, _)| candidate == role)
            .map_or_else(|| self.fallback.clone(), |(_, route)| route.clone())
    }

    /// Landing route for a session; a session without a profile gets the fallback.
    #[must_use]
    pub fn landing_for_session(&self, session: &Session) -> Route {
        session
            .user
            .as_ref()
            .map_or_else(|| self.fallback.clone(), |user| self.landing_for(&user.role))
    }
}
