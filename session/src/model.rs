//! Session data model and login wire payloads.
//!
//! DESIGN
//! ======
//! A [`Session`] keeps each field optional so a partially written store can
//! still be represented; only `access` decides whether the client is
//! authenticated.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};

/// Account type reported by the backend in `user_type`.
///
/// Unknown values are kept verbatim so a newer backend never breaks login.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    Admin,
    Partner,
    OrganizationAdmin,
    Employee,
    Other(String),
}

impl UserRole {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Partner => "partner",
            Self::OrganizationAdmin => "organization_admin",
            Self::Employee => "employee",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for UserRole {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "admin" => Self::Admin,
            "partner" => Self::Partner,
            "organization_admin" => Self::OrganizationAdmin,
            "employee" => Self::Employee,
            _ => Self::Other(raw),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// Profile of the signed-in user as returned by the login endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(rename = "user_type")]
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl UserProfile {
    /// Name to greet the user with: full name when known, else username.
    #[must_use]
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        match (first.is_empty(), last.is_empty()) {
            (true, true) => self.username.clone(),
            (false, true) => first.to_owned(),
            (true, false) => last.to_owned(),
            (false, false) => format!("{first} {last}"),
        }
    }
}

/// Credential set held by the client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub access: Option<String>,
    pub refresh: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    /// Fully populated session, as produced by a successful login.
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: impl Into<String>, user: UserProfile) -> Self {
        Self {
            access: Some(access.into()),
            refresh: Some(refresh.into()),
            user: Some(user),
        }
    }

    /// Presence check only; the token's validity is discovered by the gateway.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access.is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none() && self.user.is_none()
    }

    /// Drops empty-string tokens so "set to nothing" and "not set" are the
    /// same state.
    #[must_use]
    pub(crate) fn normalized(mut self) -> Self {
        self.access = self.access.filter(|token| !token.is_empty());
        self.refresh = self.refresh.filter(|token| !token.is_empty());
        self
    }
}

/// Success body of `POST /login/` and `POST /google-login/`.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserProfile,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Session::new(response.access, response.refresh, response.user)
    }
}
