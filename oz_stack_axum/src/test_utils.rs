//! Shared setup for the tests in this crate

use axum::body::{Body, to_bytes};
use http::Response;
use oz_stack::{AuthConfig, Authenticator, TaskStore};

use crate::AppState;

pub(crate) const PASSWORD: &str = "test-password";

/// Authenticator with a fixed secret and non-Secure cookies
pub(crate) fn test_authenticator(disabled: bool) -> Authenticator {
    Authenticator::new(
        AuthConfig::new("test-secret", PASSWORD)
            .with_disabled(disabled)
            .with_secure_cookie(false),
    )
}

/// `Cookie` header value carrying a freshly issued session token
pub(crate) fn auth_cookie(auth: &Authenticator) -> String {
    let token = auth
        .issue_token(PASSWORD)
        .expect("Test password should be accepted");
    format!("{}={}", auth.config().cookie_name(), token)
}

/// App state over a fresh in-memory task table
pub(crate) async fn test_state(disabled: bool) -> AppState {
    let tasks = TaskStore::connect("sqlite::memory:", "").expect("Failed to configure store");
    tasks.init().await.expect("Failed to initialize store");
    AppState::new(test_authenticator(disabled), tasks)
}

pub(crate) async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
