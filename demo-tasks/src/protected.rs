use std::sync::Arc;

use askama::Template;
use axum::{
    Router,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{Html, IntoResponse, Response},
    routing::get,
};

use oz_stack_axum::{Authenticator, is_authenticated_or_redirect};

pub(super) fn router(auth: Arc<Authenticator>) -> Router<()> {
    Router::new()
        .route(
            "/demo",
            get(demo).route_layer(from_fn_with_state(auth, is_authenticated_or_redirect)),
        )
}

#[derive(Template)]
#[template(path = "demo.j2")]
struct DemoTemplate<'a> {
    message: &'a str,
}

// Protected by middleware, so the handler needs no auth argument
async fn demo() -> Response {
    let template = DemoTemplate {
        message: "This page is only visible after signing in.",
    };
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header::LOCATION};
    use oz_stack_axum::AuthConfig;
    use tower::ServiceExt;

    fn app(disabled: bool) -> Router {
        let auth = Authenticator::new(AuthConfig::new("demo-secret", "pw").with_disabled(disabled));
        router(Arc::new(auth))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_demo_redirects_anonymous_users() {
        let response = app(false).oneshot(get("/demo")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
    }

    #[tokio::test]
    async fn test_demo_with_auth_disabled() {
        let response = app(true).oneshot(get("/demo")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_only_demo_page_is_served() {
        let app = app(true);

        let response = app.clone().oneshot(get("/demo")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("only visible after signing in"));

        for uri in ["/hello", "/api/random", "/api/random/html"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }
}
