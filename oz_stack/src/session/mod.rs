mod config;
mod errors;
mod main;

pub use config::{
    AuthConfig, DEFAULT_AUTH_COOKIE_NAME, DEFAULT_AUTH_PASSWORD, DEFAULT_AUTH_TOKEN_EXPIRY,
};
pub use errors::SessionError;
pub use main::{Authenticator, hash_password};
