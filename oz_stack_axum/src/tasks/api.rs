use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use oz_stack::{NewTask, Task, TaskError, TaskFilter, TaskStore, TaskUpdate};

use crate::error::IntoResponseError;
use crate::session::RequireAuth;

pub(super) const DEFAULT_PAGE_LIMIT: i64 = 100;

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

/// Query string of `GET /api/tasks`
#[derive(Debug, Deserialize)]
pub(super) struct ListParams {
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
    name: Option<String>,
    status: Option<String>,
    is_completed: Option<bool>,
}

impl ListParams {
    fn filter(&self) -> TaskFilter {
        TaskFilter {
            name: self.name.clone(),
            status: self.status.clone(),
            is_completed: self.is_completed,
        }
    }
}

pub(super) async fn list_tasks(
    _: RequireAuth,
    State(tasks): State<TaskStore>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Task>>, (StatusCode, String)> {
    let list = tasks
        .list_tasks(params.skip, params.limit, &params.filter())
        .await
        .into_response_error()?;
    Ok(Json(list))
}

pub(super) async fn create_task(
    _: RequireAuth,
    State(tasks): State<TaskStore>,
    Json(new_task): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, String)> {
    let task = tasks.create_task(new_task).await.into_response_error()?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub(super) async fn get_task(
    _: RequireAuth,
    State(tasks): State<TaskStore>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, (StatusCode, String)> {
    let task = tasks
        .get_task(id)
        .await
        .and_then(|task| task.ok_or(TaskError::NotFound))
        .into_response_error()?;
    Ok(Json(task))
}

/// Applies a partial update; fields missing from the body keep their value
pub(super) async fn update_task(
    _: RequireAuth,
    State(tasks): State<TaskStore>,
    Path(id): Path<i64>,
    Json(update): Json<TaskUpdate>,
) -> Result<Json<Task>, (StatusCode, String)> {
    let task = tasks
        .update_task(id, update)
        .await
        .and_then(|task| task.ok_or(TaskError::NotFound))
        .into_response_error()?;
    Ok(Json(task))
}

pub(super) async fn delete_task(
    _: RequireAuth,
    State(tasks): State<TaskStore>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = tasks.delete_task(id).await.into_response_error()?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, TaskError::NotFound.to_string()))
    }
}
