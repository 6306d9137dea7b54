mod errors;
mod storage;
mod types;

pub use errors::TaskError;
pub use storage::TaskStore;
pub use types::{
    DEFAULT_TASK_STATUS, NewTask, TASK_NAME_MAX_CHARS, Task, TaskFilter, TaskUpdate,
};
