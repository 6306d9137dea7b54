use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use oz_stack::Authenticator;

use crate::config::OZ_LOGIN_URL;
use crate::error::IntoResponseError;

/// Clears the session cookie and sends the browser back to the login page
pub(super) async fn logout(
    State(auth): State<Arc<Authenticator>>,
) -> Result<Response, (StatusCode, String)> {
    let mut headers = HeaderMap::new();
    auth.clear_auth_cookie(&mut headers).into_response_error()?;

    tracing::info!("User logged out");
    Ok((headers, Redirect::to(OZ_LOGIN_URL.as_str())).into_response())
}
