use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::taskdb::errors::TaskError;

pub const DEFAULT_TASK_STATUS: &str = "Pending";
pub const TASK_NAME_MAX_CHARS: usize = 100;

/// A stored task
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Task {
    /// Database-assigned identifier
    pub id: i64,
    /// Task name or title
    pub name: String,
    /// Detailed task description
    pub description: Option<String>,
    /// Current task status, free text such as "Pending" or "In Progress"
    pub status: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTask {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to "Pending"
    #[serde(default)]
    pub status: Option<String>,
}

impl NewTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            status: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), TaskError> {
        validate_name(&self.name)
    }

    pub(crate) fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_TASK_STATUS)
    }
}

/// Partial update of a task; only fields that are set change.
///
/// `description` distinguishes "absent" (`None`) from an explicit JSON
/// `null` (`Some(None)`), which clears the stored description.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.is_completed.is_none()
    }

    pub(crate) fn validate(&self) -> Result<(), TaskError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }
}

fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Equality filters for listing tasks
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

fn validate_name(name: &str) -> Result<(), TaskError> {
    let len = name.chars().count();
    if len == 0 {
        return Err(TaskError::InvalidData("Task name must not be empty".to_string()));
    }
    if len > TASK_NAME_MAX_CHARS {
        return Err(TaskError::InvalidData(format!(
            "Task name must be at most {TASK_NAME_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_task_defaults() {
        let task: NewTask = serde_json::from_str(r#"{"name":"Write docs"}"#).unwrap();

        assert_eq!(task.name, "Write docs");
        assert_eq!(task.description, None);
        assert_eq!(task.status_or_default(), "Pending");
        assert!(task.validate().is_ok());
    }

    #[test]
    fn test_new_task_name_bounds() {
        assert!(NewTask::new("").validate().is_err());
        assert!(NewTask::new("a".repeat(100)).validate().is_ok());
        assert!(NewTask::new("a".repeat(101)).validate().is_err());
        // Characters, not bytes, are counted
        assert!(NewTask::new("é".repeat(100)).validate().is_ok());
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        // Given an update with an explicit null description
        let cleared: TaskUpdate = serde_json::from_str(r#"{"description":null}"#).unwrap();
        // And one without the field
        let absent: TaskUpdate = serde_json::from_str(r#"{"status":"Done"}"#).unwrap();

        // Then the first clears and the second leaves the description alone
        assert_eq!(cleared.description, Some(None));
        assert!(!cleared.is_empty());
        assert_eq!(absent.description, None);
        assert_eq!(absent.status.as_deref(), Some("Done"));
    }

    #[test]
    fn test_empty_update() {
        let update: TaskUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.is_empty());
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_validates_name() {
        let update = TaskUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(update.validate(), Err(TaskError::InvalidData(_))));
    }

    proptest! {
        /// Names are accepted exactly when they have 1 to 100 characters
        #[test]
        fn test_name_length_rule(name in "\\PC{0,120}") {
            let len = name.chars().count();
            let valid = NewTask::new(name).validate().is_ok();
            prop_assert_eq!(valid, (1..=100).contains(&len));
        }
    }
}
