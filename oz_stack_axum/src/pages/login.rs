use std::sync::Arc;

use askama::Template;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use oz_stack::Authenticator;

use crate::config::OZ_REDIRECT_USER;
use crate::error::IntoResponseError;
use crate::session::AuthStatus;

#[derive(Template)]
#[template(path = "login.j2")]
struct LoginTemplate<'a> {
    error: Option<&'a str>,
}

#[derive(Deserialize)]
pub(super) struct LoginForm {
    password: String,
}

fn render_login(error: Option<&str>) -> Result<Html<String>, (StatusCode, String)> {
    let template = LoginTemplate { error };
    let html = template
        .render()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Html(html))
}

pub(super) async fn login(
    AuthStatus(authenticated): AuthStatus,
) -> Result<Response, (StatusCode, String)> {
    if authenticated {
        return Ok(Redirect::to(OZ_REDIRECT_USER.as_str()).into_response());
    }
    Ok(render_login(None)?.into_response())
}

/// Checks the submitted password and sets the session cookie on success
///
/// A wrong password re-renders the form with `401 Unauthorized` and no cookie.
pub(super) async fn login_submit(
    State(auth): State<Arc<Authenticator>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, (StatusCode, String)> {
    let mut headers = HeaderMap::new();

    if auth
        .set_auth_cookie(&mut headers, &form.password)
        .into_response_error()?
    {
        tracing::info!("User logged in");
        return Ok((headers, Redirect::to(OZ_REDIRECT_USER.as_str())).into_response());
    }

    Ok((
        StatusCode::UNAUTHORIZED,
        render_login(Some("Invalid password"))?,
    )
        .into_response())
}
