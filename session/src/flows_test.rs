use std::sync::Arc;

use async_trait::async_trait;

use super::*;
use crate::error::{GatewayError, TransportError};
use crate::gateway::{Method, OutboundRequest, RawResponse, Transport};
use crate::notice::NoticeLevel;
use crate::testing::{Harness, RecordingNavigator, login_body, signed_in};

fn form(identifier: &str, password: &str, accepted_terms: bool) -> LoginForm {
    LoginForm {
        identifier: identifier.to_owned(),
        password: password.to_owned(),
        accepted_terms,
    }
}

fn flows(h: &Harness) -> AuthFlows {
    AuthFlows::new(h.gateway.clone())
}

// =============================================================
// login
// =============================================================

#[tokio::test]
async fn admin_login_saves_session_and_lands_on_admin_dashboard() {
    let h = Harness::new();
    h.transport.push(200, &login_body("tok1", "admin"));

    let outcome = flows(&h).login(&form("pat", "secret", true)).await.unwrap();

    assert_eq!(outcome.redirect, Some(Route::AdminDashboard));
    let session = h.store.load();
    assert_eq!(session.access.as_deref(), Some("tok1"));
    assert_eq!(session.refresh.as_deref(), Some("ref-tok1"));
    assert_eq!(session.user.map(|u| u.username).as_deref(), Some("pat"));
}

#[tokio::test]
async fn member_login_lands_on_default_dashboard() {
    let h = Harness::new();
    h.transport.push(200, &login_body("tok1", "member"));

    let outcome = flows(&h).login(&form("pat", "secret", true)).await.unwrap();

    assert_eq!(outcome.redirect, Some(Route::Dashboard));
}

#[tokio::test]
async fn login_posts_trimmed_identifier_without_token() {
    let h = Harness::new();
    h.transport.push(200, &login_body("tok1", "employee"));

    flows(&h).login(&form("  pat@example.com ", "pw", true)).await.unwrap();

    let sent = h.transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].path, LOGIN_PATH);
    assert_eq!(sent[0].body, Some(serde_json::json!({ "username": "pat@example.com", "password": "pw" })));
    assert!(sent[0].bearer.is_none());
}

#[tokio::test]
async fn login_validation_makes_no_request() {
    let h = Harness::new();
    let flows = flows(&h);

    for bad in [form("", "pw", true), form("pat", "", true), form("pat", "pw", false), form("   ", "pw", true)] {
        let err = flows.login(&bad).await.unwrap_err();
        assert_eq!(err, FlowError::Validation("Fill in all fields and accept terms"));
    }
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn login_refused_when_already_signed_in() {
    let h = Harness::new();
    h.store.save(signed_in("employee")).unwrap();

    let err = flows(&h).login(&form("pat", "pw", true)).await.unwrap_err();

    assert_eq!(err, FlowError::AlreadyAuthenticated);
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn login_rejection_leaves_store_empty() {
    let h = Harness::new();
    h.transport.push(403, r#"{"error":"Your organization is not yet approved. Please wait for admin approval."}"#);

    let err = flows(&h).login(&form("pat", "pw", true)).await.unwrap_err();

    assert!(h.store.load().is_empty());
    assert_eq!(
        Flow::Login.failure_notice(&err).message,
        "Your organization is not yet approved. Please wait for admin approval."
    );
}

#[tokio::test]
async fn login_with_malformed_success_body_keeps_store_empty() {
    let h = Harness::new();
    h.transport.push(200, r#"{"access":"tok1"}"#);

    let err = flows(&h).login(&form("pat", "pw", true)).await.unwrap_err();

    assert!(matches!(err, FlowError::Gateway(GatewayError::Decode(_))));
    assert!(h.store.load().is_empty());
}

/// Transport that simulates a logout landing while the login is in flight.
struct ClearsStoreMidFlight {
    store: SessionStore,
}

#[async_trait(?Send)]
impl Transport for ClearsStoreMidFlight {
    async fn send(&self, _request: &OutboundRequest) -> Result<RawResponse, TransportError> {
        self.store.clear().unwrap();
        Ok(RawResponse::new(200, login_body("late", "admin")))
    }
}

#[tokio::test]
async fn login_response_arriving_after_logout_is_discarded() {
    let store = SessionStore::in_memory();
    let gateway = Gateway::new(
        store.clone(),
        Arc::new(ClearsStoreMidFlight { store: store.clone() }),
        Arc::new(RecordingNavigator::default()),
    );

    let err = AuthFlows::new(gateway).login(&form("pat", "pw", true)).await.unwrap_err();

    assert_eq!(err, FlowError::Superseded);
    assert!(store.load().is_empty());
}

// =============================================================
// google_login
// =============================================================

#[tokio::test]
async fn google_login_exchanges_credential() {
    let h = Harness::new();
    h.transport.push(200, &login_body("g-tok", "partner"));

    let outcome = flows(&h).google_login("id-token-from-google").await.unwrap();

    assert_eq!(outcome.redirect, Some(Route::Dashboard));
    let sent = h.transport.requests();
    assert_eq!(sent[0].path, GOOGLE_LOGIN_PATH);
    assert_eq!(sent[0].body, Some(serde_json::json!({ "access_token": "id-token-from-google" })));
    assert_eq!(h.store.access_token().as_deref(), Some("g-tok"));
}

#[tokio::test]
async fn google_login_without_credential_is_rejected_locally() {
    let h = Harness::new();
    let err = flows(&h).google_login("  ").await.unwrap_err();
    assert!(matches!(err, FlowError::Validation(_)));
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn google_login_response_arriving_after_logout_is_discarded() {
    let store = SessionStore::in_memory();
    let gateway = Gateway::new(
        store.clone(),
        Arc::new(ClearsStoreMidFlight { store: store.clone() }),
        Arc::new(RecordingNavigator::default()),
    );

    let err = AuthFlows::new(gateway).google_login("id-token").await.unwrap_err();

    assert_eq!(err, FlowError::Superseded);
    assert!(store.load().is_empty());
}

#[tokio::test]
async fn google_login_invalid_token_uses_backend_message() {
    let h = Harness::new();
    h.transport.push(400, r#"{"error":"Invalid token"}"#);
    let err = flows(&h).google_login("bad").await.unwrap_err();
    assert_eq!(Flow::GoogleLogin.failure_notice(&err).message, "Invalid token");
}

// =============================================================
// logout
// =============================================================

#[tokio::test]
async fn logout_invalidates_refresh_token_then_clears() {
    let h = Harness::new();
    h.store.save(signed_in("employee")).unwrap();
    h.transport.push(200, r#"{"message":"Logout successful"}"#);

    let outcome = flows(&h).logout().await;

    assert_eq!(outcome.redirect, Some(Route::Login));
    assert!(h.store.load().is_empty());
    let sent = h.transport.requests();
    assert_eq!(sent[0].path, LOGOUT_PATH);
    assert_eq!(sent[0].body, Some(serde_json::json!({ "refresh": "ref1" })));
    assert_eq!(sent[0].authorization().as_deref(), Some("Bearer tok1"));
}

#[tokio::test]
async fn logout_clears_locally_when_server_call_fails() {
    let h = Harness::new();
    h.store.save(signed_in("employee")).unwrap();
    h.transport.push_error(TransportError::Network("offline".to_owned()));

    let outcome = flows(&h).logout().await;

    assert_eq!(outcome.redirect, Some(Route::Login));
    assert!(h.store.load().is_empty());
}

#[tokio::test]
async fn logout_with_expired_token_still_lands_on_login() {
    let h = Harness::new();
    h.store.save(signed_in("employee")).unwrap();
    h.transport.push(401, r#"{"detail":"Token is invalid or expired"}"#);

    let outcome = flows(&h).logout().await;

    assert_eq!(outcome.redirect, Some(Route::Login));
    assert!(h.store.load().is_empty());
    assert_eq!(h.navigator.redirects(), vec![Route::Login]);
    assert_eq!(h.transport.requests().len(), 1);
}

#[tokio::test]
async fn logout_without_refresh_token_skips_server_call() {
    let h = Harness::new();
    h.store
        .save(Session { access: Some("tok".to_owned()), refresh: None, user: None })
        .unwrap();

    let outcome = flows(&h).logout().await;

    assert_eq!(outcome.redirect, Some(Route::Login));
    assert!(h.transport.requests().is_empty());
    assert!(h.store.load().is_empty());
}

// =============================================================
// password flows
// =============================================================

#[tokio::test]
async fn forgot_password_reports_success_without_touching_session() {
    let h = Harness::new();
    h.transport.push(200, r#"{"message":"Password reset link sent to your email"}"#);

    let outcome = flows(&h).forgot_password("pat@example.com").await.unwrap();

    let notice = outcome.notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Reset link sent to your email");
    assert!(outcome.redirect.is_none());
    assert!(h.store.load().is_empty());
}

#[tokio::test]
async fn forgot_password_unknown_user_surfaces_backend_message() {
    let h = Harness::new();
    h.transport.push(404, r#"{"error":"User not found"}"#);

    let err = flows(&h).forgot_password("nobody@example.com").await.unwrap_err();

    let notice = Flow::ForgotPassword.failure_notice(&err);
    assert!(notice.is_error());
    assert_eq!(notice.message, "User not found");
}

#[tokio::test]
async fn forgot_password_requires_email() {
    let h = Harness::new();
    let err = flows(&h).forgot_password("").await.unwrap_err();
    assert_eq!(Flow::ForgotPassword.failure_notice(&err).message, "Email is required");
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn reset_password_posts_to_link_path_and_returns_to_login() {
    let h = Harness::new();
    h.store.save(signed_in("employee")).unwrap();
    h.transport.push(200, r#"{"message":"Password reset successful"}"#);

    let outcome = flows(&h).reset_password("MQ", "c4k-9f2", "n3w").await.unwrap();

    assert_eq!(outcome.redirect, Some(Route::Login));
    assert_eq!(outcome.notice.map(|n| n.message).as_deref(), Some("Password reset successfully"));
    let sent = h.transport.requests();
    assert_eq!(sent[0].path, "/reset-password/MQ/c4k-9f2/");
    assert!(sent[0].bearer.is_none());
}

#[tokio::test]
async fn reset_password_transport_failure_gets_generic_notice() {
    let h = Harness::new();
    h.transport.push_error(TransportError::Timeout);

    let err = flows(&h).reset_password("MQ", "t", "pw").await.unwrap_err();

    assert_eq!(Flow::ResetPassword.failure_notice(&err).message, "Failed to reset password");
}

#[tokio::test]
async fn change_password_sends_bearer_and_reports_success() {
    let h = Harness::new();
    h.store.save(signed_in("employee")).unwrap();
    h.transport.push(200, r#"{"message":"Password changed successfully"}"#);

    let outcome = flows(&h).change_password("old", "new").await.unwrap();

    assert_eq!(
        outcome.notice.map(|n| n.message).as_deref(),
        Some("Password changed. Please log in again.")
    );
    let sent = h.transport.requests();
    assert_eq!(sent[0].authorization().as_deref(), Some("Bearer tok1"));
    assert_eq!(sent[0].body, Some(serde_json::json!({ "current_password": "old", "new_password": "new" })));
    assert!(h.store.is_authenticated());
}

#[tokio::test]
async fn change_password_requires_both_fields() {
    let h = Harness::new();
    for (current, new) in [("", "new"), ("old", "")] {
        let err = flows(&h).change_password(current, new).await.unwrap_err();
        assert_eq!(err, FlowError::Validation("Both fields are required"));
    }
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn change_password_unauthorized_purges_session_and_redirects() {
    let h = Harness::new();
    h.store.save(signed_in("employee")).unwrap();
    h.transport.push(401, r#"{"detail":"Authentication credentials were not provided."}"#);

    let err = flows(&h).change_password("old", "new").await.unwrap_err();

    assert_eq!(err, FlowError::Gateway(GatewayError::AuthExpired));
    assert!(h.store.load().is_empty());
    assert_eq!(h.navigator.redirects(), vec![Route::Login]);
    assert_eq!(Flow::ChangePassword.failure_notice(&err).message, "Failed to change password");
}

// =============================================================
// failure_notice
// =============================================================

#[test]
fn already_authenticated_notice_matches_login_page_copy() {
    assert_eq!(
        Flow::Login.failure_notice(&FlowError::AlreadyAuthenticated).message,
        "You are already logged in."
    );
}

#[test]
fn superseded_gets_fallback_message() {
    assert_eq!(Flow::Login.failure_notice(&FlowError::Superseded).message, "Login failed");
}
