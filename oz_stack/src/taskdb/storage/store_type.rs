use std::sync::Arc;

use crate::storage::{DEFAULT_DATABASE_URL, DataStore, connect_data_store};
use crate::taskdb::{
    errors::TaskError,
    types::{NewTask, Task, TaskFilter, TaskUpdate},
};

use super::config::task_table_name;
use super::postgres::*;
use super::sqlite::*;

/// Task persistence over a pooled SQLite or PostgreSQL connection.
///
/// Cloning is cheap and every clone shares the pool. Each operation checks
/// a connection out of the pool and returns it when the query finishes.
#[derive(Clone, Debug)]
pub struct TaskStore {
    store: Arc<dyn DataStore>,
    table_name: String,
}

impl TaskStore {
    /// Configure a store for `database_url` (`sqlite:...` or `postgres://...`).
    ///
    /// The connection is opened lazily on first use; call [`TaskStore::init`]
    /// before serving requests.
    pub fn connect(database_url: &str, table_prefix: &str) -> Result<Self, TaskError> {
        Ok(Self {
            store: connect_data_store(database_url)?,
            table_name: task_table_name(table_prefix)?,
        })
    }

    /// Configure a store from `DATABASE_URL` (default `sqlite:app.db`) and
    /// `DB_TABLE_PREFIX` (default empty).
    pub fn from_env() -> Result<Self, TaskError> {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let prefix = std::env::var("DB_TABLE_PREFIX").unwrap_or_default();
        Self::connect(&url, &prefix)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Create the task table if needed and check its schema
    pub async fn init(&self) -> Result<(), TaskError> {
        match (self.store.as_sqlite(), self.store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool, &self.table_name).await?;
                validate_task_tables_sqlite(pool, &self.table_name).await?;
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool, &self.table_name).await?;
                validate_task_tables_postgres(pool, &self.table_name).await?;
            }
            _ => return Err(TaskError::Storage("Unsupported database type".to_string())),
        }

        tracing::info!(table = %self.table_name, "Task table ready");
        Ok(())
    }

    /// Get a task by its ID
    #[tracing::instrument(skip(self))]
    pub async fn get_task(&self, id: i64) -> Result<Option<Task>, TaskError> {
        let result = if let Some(pool) = self.store.as_sqlite() {
            get_task_sqlite(pool, &self.table_name, id).await
        } else if let Some(pool) = self.store.as_postgres() {
            get_task_postgres(pool, &self.table_name, id).await
        } else {
            Err(TaskError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(task) => tracing::debug!(found = task.is_some(), "Task lookup completed"),
            Err(e) => tracing::error!(error = %e, "Task lookup failed"),
        }

        result
    }

    /// List tasks ordered by ID, skipping `skip` rows and returning at most `limit`
    #[tracing::instrument(skip(self))]
    pub async fn list_tasks(
        &self,
        skip: i64,
        limit: i64,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, TaskError> {
        if skip < 0 || limit < 0 {
            return Err(TaskError::InvalidData(
                "skip and limit must not be negative".to_string(),
            ));
        }

        let result = if let Some(pool) = self.store.as_sqlite() {
            list_tasks_sqlite(pool, &self.table_name, skip, limit, filter).await
        } else if let Some(pool) = self.store.as_postgres() {
            list_tasks_postgres(pool, &self.table_name, skip, limit, filter).await
        } else {
            Err(TaskError::Storage("Unsupported database type".to_string()))
        };

        if let Err(e) = &result {
            tracing::error!(error = %e, "Task listing failed");
        }

        result
    }

    #[tracing::instrument(skip(self, task), fields(task_name = %task.name))]
    pub async fn create_task(&self, task: NewTask) -> Result<Task, TaskError> {
        task.validate()?;

        let result = if let Some(pool) = self.store.as_sqlite() {
            create_task_sqlite(pool, &self.table_name, &task).await
        } else if let Some(pool) = self.store.as_postgres() {
            create_task_postgres(pool, &self.table_name, &task).await
        } else {
            Err(TaskError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(task) => tracing::info!(task_id = task.id, "Task created"),
            Err(e) => tracing::error!(error = %e, "Task creation failed"),
        }

        result
    }

    /// Apply the fields set in `update`; `None` when no task has this ID
    #[tracing::instrument(skip(self, update))]
    pub async fn update_task(
        &self,
        id: i64,
        update: TaskUpdate,
    ) -> Result<Option<Task>, TaskError> {
        update.validate()?;

        if update.is_empty() {
            return self.get_task(id).await;
        }

        let result = if let Some(pool) = self.store.as_sqlite() {
            update_task_sqlite(pool, &self.table_name, id, &update).await
        } else if let Some(pool) = self.store.as_postgres() {
            update_task_postgres(pool, &self.table_name, id, &update).await
        } else {
            Err(TaskError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(task) => tracing::info!(updated = task.is_some(), "Task update completed"),
            Err(e) => tracing::error!(error = %e, "Task update failed"),
        }

        result
    }

    /// Delete a task; `false` when no task has this ID
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: i64) -> Result<bool, TaskError> {
        let result = if let Some(pool) = self.store.as_sqlite() {
            delete_task_sqlite(pool, &self.table_name, id).await
        } else if let Some(pool) = self.store.as_postgres() {
            delete_task_postgres(pool, &self.table_name, id).await
        } else {
            Err(TaskError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(deleted) => tracing::info!(deleted = *deleted, "Task delete completed"),
            Err(e) => tracing::error!(error = %e, "Task delete failed"),
        }

        result
    }
}
