use std::sync::Arc;

use axum::extract::FromRef;
use oz_stack::{Authenticator, TaskStore};

/// Shared state for the routers in this crate.
///
/// Handlers and middleware take the part they need through `FromRef`, so an
/// application with its own state only has to implement `FromRef` for
/// `Arc<Authenticator>` and `TaskStore`.
#[derive(Clone, Debug, FromRef)]
pub struct AppState {
    pub auth: Arc<Authenticator>,
    pub tasks: TaskStore,
}

impl AppState {
    pub fn new(auth: Authenticator, tasks: TaskStore) -> Self {
        Self {
            auth: Arc::new(auth),
            tasks,
        }
    }
}
