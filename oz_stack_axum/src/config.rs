//! Page routes used by the axum integration

use std::sync::LazyLock;

/// Login page that unauthenticated page requests are redirected to
/// Default: "/login"
pub static OZ_LOGIN_URL: LazyLock<String> =
    LazyLock::new(|| std::env::var("OZ_LOGIN_URL").unwrap_or_else(|_| "/login".to_string()));

/// Destination after a successful login
/// Default: "/"
pub static OZ_REDIRECT_USER: LazyLock<String> =
    LazyLock::new(|| std::env::var("OZ_REDIRECT_USER").unwrap_or_else(|_| "/".to_string()));
