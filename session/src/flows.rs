//! Login, logout and password flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each flow validates its input, makes exactly one gateway call and applies
//! its local effect. Pages render the returned [`Outcome`] or turn a
//! [`FlowError`] into a notice with [`Flow::failure_notice`].
//!
//! Login-style flows capture the store generation before dispatch. If a
//! logout or 401 purge lands while the request is in flight, the late
//! response is discarded instead of resurrecting the session.

#[cfg(test)]
#[path = "flows_test.rs"]
mod flows_test;

use serde::Serialize;

use crate::error::FlowError;
use crate::gateway::{Access, Gateway};
use crate::model::{LoginResponse, Session};
use crate::notice::Notice;
use crate::route::{LandingPolicy, Route};
use crate::store::{Generation, SessionStore};

pub const LOGIN_PATH: &str = "/login/";
pub const GOOGLE_LOGIN_PATH: &str = "/google-login/";
pub const LOGOUT_PATH: &str = "/logout/";
pub const FORGOT_PASSWORD_PATH: &str = "/forgot-password/";
pub const CHANGE_PASSWORD_PATH: &str = "/change-password/";

/// Backend path of the reset-confirm endpoint for a reset link.
#[must_use]
pub fn reset_password_path(uid: &str, token: &str) -> String {
    format!("/reset-password/{uid}/{token}/")
}

/// Identifies a flow for failure reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Login,
    GoogleLogin,
    ForgotPassword,
    ResetPassword,
    ChangePassword,
}

impl Flow {
    /// Message shown when the failure carries nothing more specific.
    #[must_use]
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::Login => "Login failed",
            Self::GoogleLogin => "Google login failed",
            Self::ForgotPassword => "Failed to send reset link",
            Self::ResetPassword => "Failed to reset password",
            Self::ChangePassword => "Failed to change password",
        }
    }

    /// Error notice for a failed run of this flow.
    ///
    /// Validation messages and backend rejection messages are shown
    /// verbatim; everything else gets the flow's generic message.
    #[must_use]
    pub fn failure_notice(self, err: &FlowError) -> Notice {
        let message = match err {
            FlowError::Validation(message) => (*message).to_owned(),
            FlowError::AlreadyAuthenticated => err.to_string(),
            FlowError::Gateway(gateway) => gateway
                .remote_message()
                .map_or_else(|| self.fallback_message().to_owned(), str::to_owned),
            FlowError::Superseded | FlowError::Store(_) => self.fallback_message().to_owned(),
        };
        Notice::error(message)
    }
}

/// What a successful flow asks the UI to do.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub notice: Option<Notice>,
    pub redirect: Option<Route>,
}

impl Outcome {
    fn redirect(route: Route) -> Self {
        Self { notice: None, redirect: Some(route) }
    }

    fn notice(notice: Notice) -> Self {
        Self { notice: Some(notice), redirect: None }
    }
}

/// Username/password login form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Username or email.
    pub identifier: String,
    pub password: String,
    pub accepted_terms: bool,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct CredentialExchangeRequest<'a> {
    access_token: &'a str,
}

#[derive(Serialize)]
struct LogoutRequest<'a> {
    refresh: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordRequest<'a> {
    password: &'a str,
}

#[derive(Serialize)]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// Authentication flows bound to one gateway and landing policy.
#[derive(Clone)]
pub struct AuthFlows {
    gateway: Gateway,
    landing: LandingPolicy,
}

impl AuthFlows {
    pub fn new(gateway: Gateway) -> Self {
        Self::with_landing(gateway, LandingPolicy::default())
    }

    pub fn with_landing(gateway: Gateway, landing: LandingPolicy) -> Self {
        Self { gateway, landing }
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        self.gateway.store()
    }

    /// Sign in with username (or email) and password.
    ///
    /// # Errors
    ///
    /// - [`FlowError::AlreadyAuthenticated`] if a session is present.
    /// - [`FlowError::Validation`] for empty fields or unaccepted terms.
    /// - [`FlowError::Gateway`] / [`FlowError::Superseded`] from the exchange.
    pub async fn login(&self, form: &LoginForm) -> Result<Outcome, FlowError> {
        if self.store().is_authenticated() {
            return Err(FlowError::AlreadyAuthenticated);
        }
        let identifier = form.identifier.trim();
        if identifier.is_empty() || form.password.is_empty() || !form.accepted_terms {
            return Err(FlowError::Validation("Fill in all fields and accept terms"));
        }

        let generation = self.store().generation();
        let response: LoginResponse = self
            .gateway
            .post_json(LOGIN_PATH, &LoginRequest { username: identifier, password: &form.password }, Access::Public)
            .await?;
        self.establish(generation, response.into())
    }

    /// Exchange a third-party identity provider credential for a session.
    ///
    /// # Errors
    ///
    /// Same as [`AuthFlows::login`], minus the form checks.
    pub async fn google_login(&self, credential: &str) -> Result<Outcome, FlowError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(FlowError::Validation("Google Sign-In was unsuccessful"));
        }

        let generation = self.store().generation();
        let response: LoginResponse = self
            .gateway
            .post_json(
                GOOGLE_LOGIN_PATH,
                &CredentialExchangeRequest { access_token: credential },
                Access::Public,
            )
            .await?;
        self.establish(generation, response.into())
    }

    /// Invalidate the refresh token server-side, then clear locally.
    ///
    /// The server call is best-effort: the local session is cleared and the
    /// login route returned whether or not it succeeds.
    pub async fn logout(&self) -> Outcome {
        if let Some(refresh) = self.store().refresh_token() {
            if let Err(err) = self
                .gateway
                .post(LOGOUT_PATH, &LogoutRequest { refresh: &refresh }, Access::Bearer)
                .await
            {
                log::warn!("server-side logout failed, clearing locally: {err}");
            }
        }
        if let Err(err) = self.store().clear() {
            log::error!("failed to clear session storage on logout: {err}");
        }
        Outcome::redirect(Route::Login)
    }

    /// Ask the backend to email a password reset link.
    ///
    /// # Errors
    ///
    /// [`FlowError::Validation`] for an empty email; [`FlowError::Gateway`]
    /// when the request fails.
    pub async fn forgot_password(&self, email: &str) -> Result<Outcome, FlowError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(FlowError::Validation("Email is required"));
        }
        self.gateway
            .post(FORGOT_PASSWORD_PATH, &ForgotPasswordRequest { email }, Access::Public)
            .await?;
        Ok(Outcome::notice(Notice::success("Reset link sent to your email")))
    }

    /// Set a new password using the `uid`/`token` pair from a reset link.
    ///
    /// # Errors
    ///
    /// [`FlowError::Validation`] for an empty password; [`FlowError::Gateway`]
    /// when the request fails.
    pub async fn reset_password(&self, uid: &str, token: &str, password: &str) -> Result<Outcome, FlowError> {
        if password.is_empty() {
            return Err(FlowError::Validation("Password is required"));
        }
        self.gateway
            .post(&reset_password_path(uid, token), &ResetPasswordRequest { password }, Access::Public)
            .await?;
        Ok(Outcome {
            notice: Some(Notice::success("Password reset successfully")),
            redirect: Some(Route::Login),
        })
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// [`FlowError::Validation`] when either field is empty;
    /// [`FlowError::Gateway`] when the request fails.
    pub async fn change_password(&self, current: &str, new: &str) -> Result<Outcome, FlowError> {
        if current.is_empty() || new.is_empty() {
            return Err(FlowError::Validation("Both fields are required"));
        }
        self.gateway
            .post(
                CHANGE_PASSWORD_PATH,
                &ChangePasswordRequest { current_password: current, new_password: new },
                Access::Bearer,
            )
            .await?;
        Ok(Outcome::notice(Notice::success("Password changed. Please log in again.")))
    }

    fn establish(&self, generation: Generation, session: Session) -> Result<Outcome, FlowError> {
        let landing = self.landing.landing_for_session(&session);
        if !self.store().save_if_current(generation, session)? {
            return Err(FlowError::Superseded);
        }
        log::info!("signed in, landing on {}", landing.path());
        Ok(Outcome::redirect(landing))
    }
}
