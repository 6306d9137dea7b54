use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use oz_stack::Authenticator;

use super::config::OZ_LOGIN_URL;
use super::session::AuthRejection;

/// Authentication checker with 401 response
///
/// Apply with `axum::middleware::from_fn_with_state(state, is_authenticated_401)`.
pub async fn is_authenticated_401(
    State(auth): State<Arc<Authenticator>>,
    req: Request,
    next: Next,
) -> Response {
    if auth.is_authenticated(req.headers()) {
        next.run(req).await
    } else {
        AuthRejection.into_response()
    }
}

/// Authentication checker that redirects to the login page
pub async fn is_authenticated_or_redirect(
    State(auth): State<Arc<Authenticator>>,
    req: Request,
    next: Next,
) -> Response {
    if auth.is_authenticated(req.headers()) {
        next.run(req).await
    } else {
        tracing::debug!("Redirecting to {}", OZ_LOGIN_URL.as_str());
        Redirect::to(OZ_LOGIN_URL.as_str()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{auth_cookie, test_authenticator};
    use axum::{Router, body::Body, middleware::from_fn_with_state, routing::get};
    use http::{StatusCode, header::COOKIE, header::LOCATION};
    use tower::ServiceExt;

    fn guarded_app(auth: Arc<Authenticator>) -> Router {
        Router::new()
            .route(
                "/api",
                get(|| async { "api" })
                    .layer(from_fn_with_state(auth.clone(), is_authenticated_401)),
            )
            .route(
                "/page",
                get(|| async { "page" })
                    .layer(from_fn_with_state(auth, is_authenticated_or_redirect)),
            )
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request {
        let mut builder = http::Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_unauthenticated_requests() {
        let app = guarded_app(Arc::new(test_authenticator(false)));

        // API routes answer 401
        let response = app.clone().oneshot(get_request("/api", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Page routes redirect to the login page
        let response = app.oneshot(get_request("/page", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
    }

    #[tokio::test]
    async fn test_authenticated_requests() {
        let auth = test_authenticator(false);
        let cookie = auth_cookie(&auth);
        let app = guarded_app(Arc::new(auth));

        for uri in ["/api", "/page"] {
            let response = app
                .clone()
                .oneshot(get_request(uri, Some(&cookie)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_bypass_lets_everything_through() {
        let app = guarded_app(Arc::new(test_authenticator(true)));

        for uri in ["/api", "/page"] {
            let response = app.clone().oneshot(get_request(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }
}
