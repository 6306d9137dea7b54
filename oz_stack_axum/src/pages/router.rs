use axum::{Router, routing::get};

use crate::AppState;

/// Create a router for the login, logout and index pages
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(super::index::index))
        .route(
            "/login",
            get(super::login::login).post(super::login::login_submit),
        )
        .route("/logout", get(super::logout::logout))
}
