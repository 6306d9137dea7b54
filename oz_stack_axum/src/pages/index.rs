use std::sync::Arc;

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use oz_stack::Authenticator;

use crate::config::OZ_LOGIN_URL;
use crate::session::AuthStatus;

#[derive(Template)]
#[template(path = "index.j2")]
struct IndexTemplate {
    show_logout: bool,
}

pub(super) async fn index(
    State(auth): State<Arc<Authenticator>>,
    AuthStatus(authenticated): AuthStatus,
) -> Result<Response, (StatusCode, String)> {
    if !authenticated {
        tracing::debug!("Redirecting to {}", OZ_LOGIN_URL.as_str());
        return Ok(Redirect::to(OZ_LOGIN_URL.as_str()).into_response());
    }

    let template = IndexTemplate {
        show_logout: !auth.config().is_disabled(),
    };
    let html = template
        .render()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Html(html).into_response())
}
