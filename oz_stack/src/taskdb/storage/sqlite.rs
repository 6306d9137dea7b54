use chrono::Utc;
use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::storage::validate_sqlite_table_schema;
use crate::taskdb::{
    errors::TaskError,
    types::{NewTask, Task, TaskFilter, TaskUpdate},
};

pub(super) async fn create_tables_sqlite(
    pool: &Pool<Sqlite>,
    table_name: &str,
) -> Result<(), TaskError> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            status TEXT NOT NULL DEFAULT 'Pending',
            is_completed BOOLEAN NOT NULL DEFAULT false,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

/// Validates that the task table schema matches what we expect
pub(super) async fn validate_task_tables_sqlite(
    pool: &Pool<Sqlite>,
    table_name: &str,
) -> Result<(), TaskError> {
    let expected_columns = [
        ("id", "INTEGER"),
        ("name", "TEXT"),
        ("description", "TEXT"),
        ("status", "TEXT"),
        ("is_completed", "BOOLEAN"),
        ("created_at", "TIMESTAMP"),
        ("updated_at", "TIMESTAMP"),
    ];

    validate_sqlite_table_schema(pool, table_name, &expected_columns, TaskError::Storage).await
}

pub(super) async fn get_task_sqlite(
    pool: &Pool<Sqlite>,
    table_name: &str,
    id: i64,
) -> Result<Option<Task>, TaskError> {
    let task = sqlx::query_as::<_, Task>(&format!("SELECT * FROM {table_name} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(task)
}

pub(super) async fn list_tasks_sqlite(
    pool: &Pool<Sqlite>,
    table_name: &str,
    skip: i64,
    limit: i64,
    filter: &TaskFilter,
) -> Result<Vec<Task>, TaskError> {
    let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT * FROM {table_name}"));

    let mut keyword = " WHERE ";
    if let Some(name) = &filter.name {
        query.push(keyword).push("name = ").push_bind(name.clone());
        keyword = " AND ";
    }
    if let Some(status) = &filter.status {
        query.push(keyword).push("status = ").push_bind(status.clone());
        keyword = " AND ";
    }
    if let Some(is_completed) = filter.is_completed {
        query
            .push(keyword)
            .push("is_completed = ")
            .push_bind(is_completed);
    }

    query
        .push(" ORDER BY id ASC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(skip);

    let tasks = query.build_query_as::<Task>().fetch_all(pool).await?;
    Ok(tasks)
}

pub(super) async fn create_task_sqlite(
    pool: &Pool<Sqlite>,
    table_name: &str,
    task: &NewTask,
) -> Result<Task, TaskError> {
    let now = Utc::now();

    let created = sqlx::query_as::<_, Task>(&format!(
        r#"
        INSERT INTO {table_name} (name, description, status, is_completed, created_at, updated_at)
        VALUES (?, ?, ?, false, ?, ?)
        RETURNING *
        "#
    ))
    .bind(&task.name)
    .bind(&task.description)
    .bind(task.status_or_default())
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub(super) async fn update_task_sqlite(
    pool: &Pool<Sqlite>,
    table_name: &str,
    id: i64,
    update: &TaskUpdate,
) -> Result<Option<Task>, TaskError> {
    let mut query = QueryBuilder::<Sqlite>::new(format!("UPDATE {table_name} SET updated_at = "));
    query.push_bind(Utc::now());

    if let Some(name) = &update.name {
        query.push(", name = ").push_bind(name.clone());
    }
    if let Some(description) = &update.description {
        query.push(", description = ").push_bind(description.clone());
    }
    if let Some(status) = &update.status {
        query.push(", status = ").push_bind(status.clone());
    }
    if let Some(is_completed) = update.is_completed {
        query.push(", is_completed = ").push_bind(is_completed);
    }

    query.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

    let task = query.build_query_as::<Task>().fetch_optional(pool).await?;
    Ok(task)
}

pub(super) async fn delete_task_sqlite(
    pool: &Pool<Sqlite>,
    table_name: &str,
    id: i64,
) -> Result<bool, TaskError> {
    let result = sqlx::query(&format!("DELETE FROM {table_name} WHERE id = ?"))
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
