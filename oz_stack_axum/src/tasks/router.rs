use axum::{Router, routing::get};

use crate::AppState;

/// Create a router for the task API and its htmx fragment
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/tasks",
            get(super::api::list_tasks).post(super::api::create_task),
        )
        .route("/api/tasks/html", get(super::html::tasks_html))
        .route(
            "/api/tasks/{id}",
            get(super::api::get_task)
                .patch(super::api::update_task)
                .delete(super::api::delete_task),
        )
}
