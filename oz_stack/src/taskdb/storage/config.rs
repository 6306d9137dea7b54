use crate::taskdb::errors::TaskError;

pub(super) const TASK_TABLE: &str = "tasks";

/// Full task table name for a table prefix such as `oz_`.
///
/// The name is interpolated into SQL, so the prefix is limited to ASCII
/// alphanumerics and underscores.
pub(super) fn task_table_name(prefix: &str) -> Result<String, TaskError> {
    if !prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(TaskError::InvalidData(format!(
            "Invalid table prefix: {prefix:?}"
        )));
    }
    Ok(format!("{prefix}{TASK_TABLE}"))
}
