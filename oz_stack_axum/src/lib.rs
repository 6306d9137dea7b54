//! oz-stack-axum - Axum integration for oz-stack
//!
//! Provides the session extractors and middleware, the login/logout and
//! index pages, and the JSON task API with its htmx fragment.

mod config;
mod error;
mod middleware;
mod pages;
mod router;
mod session;
mod state;
mod tasks;

#[cfg(test)]
mod test_utils;

pub use config::{OZ_LOGIN_URL, OZ_REDIRECT_USER};
pub use middleware::{is_authenticated_401, is_authenticated_or_redirect};
pub use router::{oz_stack_router, oz_stack_router_no_trace};
pub use session::{AuthRejection, AuthStatus, RequireAuth};
pub use state::AppState;

// Re-export the core types needed to build an AppState
pub use oz_stack::{AuthConfig, Authenticator, TaskStore};
