use http::HeaderMap;

use crate::session::config::AuthConfig;
use crate::session::errors::SessionError;
use crate::utils::{CookieAttributes, header_set_cookie};

pub(super) fn header_set_auth_cookie(
    headers: &mut HeaderMap,
    config: &AuthConfig,
    token: &str,
) -> Result<(), SessionError> {
    let max_age = i64::try_from(config.token_expiry).unwrap_or(i64::MAX);
    header_set_cookie(
        headers,
        &config.cookie_name,
        token,
        CookieAttributes {
            max_age,
            secure: config.secure_cookie,
            expire_now: false,
        },
    )?;
    Ok(())
}

pub(super) fn header_clear_auth_cookie(
    headers: &mut HeaderMap,
    config: &AuthConfig,
) -> Result<(), SessionError> {
    header_set_cookie(
        headers,
        &config.cookie_name,
        "",
        CookieAttributes {
            max_age: 0,
            secure: config.secure_cookie,
            expire_now: true,
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::SET_COOKIE;

    #[test]
    fn test_auth_cookie_attributes() {
        // Given a production configuration with a one hour window
        let config = AuthConfig::new("k", "p").with_token_expiry(3600);
        let mut headers = HeaderMap::new();

        // When setting the cookie
        header_set_auth_cookie(&mut headers, &config, "tok").unwrap();

        // Then all security attributes are present
        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("oz_stack_auth=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn test_auth_cookie_not_secure_in_debug() {
        let config = AuthConfig::new("k", "p").with_secure_cookie(false);
        let mut headers = HeaderMap::new();

        header_set_auth_cookie(&mut headers, &config, "tok").unwrap();

        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let config = AuthConfig::new("k", "p").with_cookie_name("custom").unwrap();
        let mut headers = HeaderMap::new();

        header_clear_auth_cookie(&mut headers, &config).unwrap();

        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("custom=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }
}
