use std::env;

use crate::session::errors::SessionError;
use crate::utils::gen_random_string;

pub const DEFAULT_AUTH_COOKIE_NAME: &str = "oz_stack_auth";
pub const DEFAULT_AUTH_TOKEN_EXPIRY: u64 = 86400;
pub const DEFAULT_AUTH_PASSWORD: &str = "admin";

/// Settings of the authentication component.
///
/// Built once at startup, either with [`AuthConfig::from_env`] or
/// programmatically, and never mutated afterwards.
#[derive(Clone)]
pub struct AuthConfig {
    pub(crate) secret_key: Vec<u8>,
    pub(crate) password: String,
    pub(crate) password_hash: Option<String>,
    pub(crate) token_expiry: u64,
    pub(crate) cookie_name: String,
    pub(crate) disabled: bool,
    pub(crate) secure_cookie: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret_key", &"<redacted>")
            .field("password", &"<redacted>")
            .field("password_hash", &self.password_hash.as_ref().map(|_| "<set>"))
            .field("token_expiry", &self.token_expiry)
            .field("cookie_name", &self.cookie_name)
            .field("disabled", &self.disabled)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

impl AuthConfig {
    /// Create a configuration with the given signing secret and reference password.
    ///
    /// All other settings take their defaults: 24h expiry, `oz_stack_auth`
    /// cookie, authentication enabled, `Secure` cookies.
    pub fn new(secret_key: impl Into<Vec<u8>>, password: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            password: password.into(),
            password_hash: None,
            token_expiry: DEFAULT_AUTH_TOKEN_EXPIRY,
            cookie_name: DEFAULT_AUTH_COOKIE_NAME.to_string(),
            disabled: false,
            secure_cookie: true,
        }
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn with_token_expiry(mut self, seconds: u64) -> Self {
        self.token_expiry = seconds;
        self
    }

    /// Use `name` for the session cookie.
    ///
    /// # Errors
    /// [`SessionError::Config`] when `name` is not a valid cookie name.
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Result<Self, SessionError> {
        let name = name.into();
        validate_cookie_name(&name)?;
        self.cookie_name = name;
        Ok(self)
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_secure_cookie(mut self, secure: bool) -> Self {
        self.secure_cookie = secure;
        self
    }

    /// Read the configuration from process environment variables.
    ///
    /// * `SECRET_KEY` - token signing secret, random per process if unset
    /// * `AUTH_PASSWORD` - reference password (default `admin`)
    /// * `AUTH_PASSWORD_HASH` - optional Argon2 PHC string
    /// * `AUTH_TOKEN_EXPIRY` - token lifetime in seconds (default 86400)
    /// * `AUTH_COOKIE_NAME` - cookie name (default `oz_stack_auth`)
    /// * `AUTH_DISABLED` - `true` disables every check
    /// * `DEBUG` - `true` (the default) drops the `Secure` cookie attribute
    pub fn from_env() -> Result<Self, SessionError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, SessionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = match lookup("SECRET_KEY").filter(|s| !s.is_empty()) {
            Some(secret) => secret.into_bytes(),
            None => {
                tracing::warn!(
                    "SECRET_KEY is not set; using a random key. Sessions will not survive a restart."
                );
                gen_random_string(32)?.into_bytes()
            }
        };

        let password = lookup("AUTH_PASSWORD").unwrap_or_else(|| {
            tracing::warn!("AUTH_PASSWORD is not set; falling back to the default password");
            DEFAULT_AUTH_PASSWORD.to_string()
        });

        let password_hash = lookup("AUTH_PASSWORD_HASH").filter(|s| !s.is_empty());

        let token_expiry = lookup("AUTH_TOKEN_EXPIRY")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_AUTH_TOKEN_EXPIRY);

        let cookie_name =
            lookup("AUTH_COOKIE_NAME").unwrap_or_else(|| DEFAULT_AUTH_COOKIE_NAME.to_string());
        validate_cookie_name(&cookie_name)?;

        let disabled = parse_bool(lookup("AUTH_DISABLED"), false);
        if disabled {
            tracing::warn!("AUTH_DISABLED is set; every request is treated as authenticated");
        }

        let secure_cookie = !parse_bool(lookup("DEBUG"), true);

        Ok(Self {
            secret_key,
            password,
            password_hash,
            token_expiry,
            cookie_name,
            disabled,
            secure_cookie,
        })
    }

    pub fn token_expiry(&self) -> u64 {
        self.token_expiry
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn secure_cookie(&self) -> bool {
        self.secure_cookie
    }
}

/// Cookie names go verbatim into `Set-Cookie`: ASCII token characters only.
fn validate_cookie_name(name: &str) -> Result<(), SessionError> {
    let invalid = name.is_empty()
        || name.chars().any(|c| {
            c.is_ascii_control()
                || c.is_whitespace()
                || !c.is_ascii()
                || matches!(c, '=' | ';' | ',' | '"' | '\\')
        });
    if invalid {
        return Err(SessionError::Config(format!("Invalid cookie name: {name:?}")));
    }
    Ok(())
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
