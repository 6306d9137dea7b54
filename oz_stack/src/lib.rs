//! oz-stack - Single-password cookie authentication and task storage
//!
//! This crate provides the framework-independent core of the Oz Stack starter
//! kit: password verification, signed authentication tokens, the session gate
//! that reads them back from request cookies, and a SQLite/PostgreSQL task store.

mod session;
mod storage;
mod taskdb;
mod utils;

pub use session::{
    AuthConfig, Authenticator, DEFAULT_AUTH_COOKIE_NAME, DEFAULT_AUTH_PASSWORD,
    DEFAULT_AUTH_TOKEN_EXPIRY, SessionError, hash_password,
};

pub use taskdb::{
    DEFAULT_TASK_STATUS, NewTask, TASK_NAME_MAX_CHARS, Task, TaskError, TaskFilter, TaskStore,
    TaskUpdate,
};

pub use utils::{UtilError, gen_random_string};
