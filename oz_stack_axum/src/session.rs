use std::{convert::Infallible, sync::Arc};

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    response::{IntoResponse, Response},
};
use http::{StatusCode, header::WWW_AUTHENTICATE, request::Parts};
use serde_json::json;

use oz_stack::{Authenticator, SessionError};

/// Rejection for requests without a valid session: `401` with
/// `WWW-Authenticate: Bearer` and a JSON `detail`.
#[derive(Debug)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        tracing::debug!("Unauthorized");
        (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, "Bearer")],
            Json(json!({ "detail": SessionError::Unauthorized.to_string() })),
        )
            .into_response()
    }
}

/// Extractor that only succeeds for authenticated requests
///
/// Use it as a handler argument to guard API endpoints:
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use oz_stack_axum::{AppState, RequireAuth};
///
/// async fn protected_handler(_: RequireAuth) -> &'static str {
///     "secret"
/// }
///
/// let app: Router<AppState> = Router::new().route("/protected", get(protected_handler));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RequireAuth;

impl<S> FromRequestParts<S> for RequireAuth
where
    Arc<Authenticator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Arc::<Authenticator>::from_ref(state);
        auth.require(&parts.headers)
            .map(|_| RequireAuth)
            .map_err(|_| AuthRejection)
    }
}

/// Whether the request is authenticated, for handlers that serve both cases
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthStatus(pub bool);

impl<S> FromRequestParts<S> for AuthStatus
where
    Arc<Authenticator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Arc::<Authenticator>::from_ref(state);
        Ok(AuthStatus(auth.is_authenticated(&parts.headers)))
    }
}
