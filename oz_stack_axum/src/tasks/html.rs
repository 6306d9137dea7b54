use askama::Template;
use axum::{extract::State, http::StatusCode, response::Html};

use oz_stack::{Task, TaskFilter, TaskStore};

use super::api::DEFAULT_PAGE_LIMIT;
use crate::error::IntoResponseError;
use crate::session::RequireAuth;

#[derive(Template)]
#[template(path = "tasks.j2")]
struct TaskListTemplate<'a> {
    tasks: &'a [Task],
}

/// Task list rendered as an htmx fragment
pub(super) async fn tasks_html(
    _: RequireAuth,
    State(tasks): State<TaskStore>,
) -> Result<Html<String>, (StatusCode, String)> {
    let list = tasks
        .list_tasks(0, DEFAULT_PAGE_LIMIT, &TaskFilter::default())
        .await
        .into_response_error()?;

    let template = TaskListTemplate { tasks: &list };
    let html = template
        .render()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Html(html))
}
