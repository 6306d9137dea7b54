use chrono::Utc;
use http::HeaderMap;

use crate::session::config::AuthConfig;
use crate::session::errors::SessionError;

use super::cookie::{header_clear_auth_cookie, header_set_auth_cookie};
use super::credential::verify_password;
use super::gate::get_cookie_from_headers;
use super::token::{sign_token, verify_token};

/// Single-password cookie session authentication.
///
/// Holds the immutable [`AuthConfig`] and implements credential checks,
/// token issuance and validation, the request gate and the cookie lifecycle.
/// It has no interior state, so one instance can be shared across all
/// requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Check a candidate password.
    ///
    /// When `stored_hash` is given and matches, the check succeeds. Otherwise
    /// the candidate is compared with the configured reference password.
    pub fn verify_password(&self, candidate: &str, stored_hash: Option<&str>) -> bool {
        verify_password(candidate, stored_hash, &self.config.password)
    }

    /// Issue a session token if `password` is correct.
    ///
    /// The configured `AUTH_PASSWORD_HASH`, if any, is accepted alongside the
    /// reference password.
    pub fn issue_token(&self, password: &str) -> Option<String> {
        self.issue_token_at(password, Utc::now().timestamp())
    }

    pub(crate) fn issue_token_at(&self, password: &str, now: i64) -> Option<String> {
        if !self.verify_password(password, self.config.password_hash.as_deref()) {
            tracing::info!("Rejected login attempt with invalid password");
            return None;
        }

        match sign_token(&self.config.secret_key, now) {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::error!("Failed to sign session token: {}", e);
                None
            }
        }
    }

    /// Validate a session token's signature and age.
    pub fn validate_token(&self, token: &str) -> bool {
        self.validate_token_at(token, Utc::now().timestamp())
    }

    pub(crate) fn validate_token_at(&self, token: &str, now: i64) -> bool {
        verify_token(
            &self.config.secret_key,
            token,
            self.config.token_expiry,
            now,
        )
    }

    /// Whether the request carries a valid session cookie, or authentication is disabled.
    pub fn is_authenticated(&self, headers: &HeaderMap) -> bool {
        self.is_authenticated_at(headers, Utc::now().timestamp())
    }

    pub(crate) fn is_authenticated_at(&self, headers: &HeaderMap, now: i64) -> bool {
        if self.config.disabled {
            return true;
        }

        let Some(token) = get_cookie_from_headers(headers, &self.config.cookie_name) else {
            return false;
        };

        let valid = self.validate_token_at(token, now);
        tracing::debug!(valid, "Checked session cookie");
        valid
    }

    /// Same check as [`Authenticator::is_authenticated`], as a guard.
    ///
    /// # Errors
    /// [`SessionError::Unauthorized`] when the request is not authenticated.
    pub fn require(&self, headers: &HeaderMap) -> Result<(), SessionError> {
        if self.is_authenticated(headers) {
            Ok(())
        } else {
            Err(SessionError::Unauthorized)
        }
    }

    /// Add a session cookie to `headers` if `password` is correct.
    ///
    /// Returns `Ok(false)` and leaves `headers` untouched on a wrong password.
    pub fn set_auth_cookie(
        &self,
        headers: &mut HeaderMap,
        password: &str,
    ) -> Result<bool, SessionError> {
        let Some(token) = self.issue_token(password) else {
            return Ok(false);
        };

        header_set_auth_cookie(headers, &self.config, &token)?;
        tracing::info!("Issued session cookie");
        Ok(true)
    }

    /// Add a `Set-Cookie` header that removes the session cookie.
    pub fn clear_auth_cookie(&self, headers: &mut HeaderMap) -> Result<(), SessionError> {
        header_clear_auth_cookie(headers, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::main::credential::hash_password;
    use http::HeaderValue;
    use http::header::{COOKIE, SET_COOKIE};
    use proptest::prelude::*;

    const PASSWORD: &str = "correct horse";

    fn authenticator() -> Authenticator {
        Authenticator::new(AuthConfig::new("test-secret", PASSWORD))
    }

    fn headers_with_cookie(name: &str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{name}={value}")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_issue_then_validate_immediately() {
        let auth = authenticator();

        let token = auth.issue_token(PASSWORD).expect("token for correct password");

        assert!(!token.is_empty());
        assert!(auth.validate_token(&token));
    }

    #[test]
    fn test_issue_with_wrong_password() {
        assert_eq!(authenticator().issue_token("wrong"), None);
    }

    #[test]
    fn test_issue_accepts_configured_hash() {
        let hash = hash_password("from-hash").unwrap();
        let auth = Authenticator::new(AuthConfig::new("k", PASSWORD).with_password_hash(hash));

        assert!(auth.issue_token("from-hash").is_some());
        assert!(auth.issue_token(PASSWORD).is_some());
        assert!(auth.issue_token("neither").is_none());
    }

    #[test]
    fn test_two_second_window_scenario() {
        // Given a two second expiry window and a token issued at t=0
        let auth = Authenticator::new(AuthConfig::new("k", PASSWORD).with_token_expiry(2));
        let t0 = 1_700_000_000;
        let token = auth.issue_token_at(PASSWORD, t0).unwrap();

        // Then it validates at t=1 and no longer at t=3
        assert!(auth.validate_token_at(&token, t0 + 1));
        assert!(!auth.validate_token_at(&token, t0 + 3));
    }

    #[test]
    fn test_cross_instance_isolation() {
        let issuer = Authenticator::new(AuthConfig::new("secret-one", PASSWORD));
        let validator = Authenticator::new(AuthConfig::new("secret-two", PASSWORD));

        let token = issuer.issue_token(PASSWORD).unwrap();

        assert!(issuer.validate_token(&token));
        assert!(!validator.validate_token(&token));
    }

    #[test]
    fn test_is_authenticated_without_cookie() {
        assert!(!authenticator().is_authenticated(&HeaderMap::new()));
    }

    #[test]
    fn test_is_authenticated_with_valid_cookie() {
        let auth = authenticator();
        let token = auth.issue_token(PASSWORD).unwrap();

        assert!(auth.is_authenticated(&headers_with_cookie("oz_stack_auth", &token)));
    }

    #[test]
    fn test_is_authenticated_reads_configured_cookie_name() {
        let auth = Authenticator::new(AuthConfig::new("k", PASSWORD).with_cookie_name("other").unwrap());
        let token = auth.issue_token(PASSWORD).unwrap();

        assert!(!auth.is_authenticated(&headers_with_cookie("oz_stack_auth", &token)));
        assert!(auth.is_authenticated(&headers_with_cookie("other", &token)));
    }

    #[test]
    fn test_is_authenticated_with_expired_cookie() {
        let auth = Authenticator::new(AuthConfig::new("k", PASSWORD).with_token_expiry(60));
        let token = auth.issue_token_at(PASSWORD, 1000).unwrap();
        let headers = headers_with_cookie("oz_stack_auth", &token);

        assert!(auth.is_authenticated_at(&headers, 1060));
        assert!(!auth.is_authenticated_at(&headers, 1061));
    }

    #[test]
    fn test_bypass_ignores_cookies() {
        // Given authentication disabled by configuration
        let auth = Authenticator::new(AuthConfig::new("k", PASSWORD).with_disabled(true));
        let expired = Authenticator::new(AuthConfig::new("k", PASSWORD))
            .issue_token_at(PASSWORD, 0)
            .unwrap();

        // Then any request is authenticated
        assert!(auth.is_authenticated(&HeaderMap::new()));
        assert!(auth.is_authenticated(&headers_with_cookie("oz_stack_auth", "garbage")));
        assert!(auth.is_authenticated(&headers_with_cookie("oz_stack_auth", &expired)));
        assert!(auth.require(&HeaderMap::new()).is_ok());
    }

    #[test]
    fn test_require() {
        let auth = authenticator();
        let token = auth.issue_token(PASSWORD).unwrap();

        assert!(matches!(
            auth.require(&HeaderMap::new()),
            Err(SessionError::Unauthorized)
        ));
        assert!(matches!(
            auth.require(&headers_with_cookie("oz_stack_auth", "a.b.c")),
            Err(SessionError::Unauthorized)
        ));
        assert!(
            auth.require(&headers_with_cookie("oz_stack_auth", &token))
                .is_ok()
        );
    }

    #[test]
    fn test_set_auth_cookie_success() {
        let auth = authenticator();
        let mut headers = HeaderMap::new();

        let set = auth.set_auth_cookie(&mut headers, PASSWORD).unwrap();

        assert!(set);
        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        let token = cookie
            .strip_prefix("oz_stack_auth=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        assert!(auth.validate_token(token));
    }

    #[test]
    fn test_set_auth_cookie_wrong_password_leaves_headers_untouched() {
        let auth = authenticator();
        let mut headers = HeaderMap::new();

        let set = auth.set_auth_cookie(&mut headers, "wrong").unwrap();

        assert!(!set);
        assert!(headers.is_empty());
    }

    #[test]
    fn test_clear_auth_cookie() {
        let auth = authenticator();
        let mut headers = HeaderMap::new();

        auth.clear_auth_cookie(&mut headers).unwrap();

        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("oz_stack_auth=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    proptest! {
        /// Tokens are issued exactly for the reference password
        #[test]
        fn test_issue_only_for_reference(candidate in "\\PC{0,24}") {
            let auth = authenticator();
            let token = auth.issue_token(&candidate);
            if candidate == PASSWORD {
                prop_assert!(token.is_some_and(|t| !t.is_empty()));
            } else {
                prop_assert!(token.is_none());
            }
        }

        /// A token stays valid for the whole window and expires right after
        #[test]
        fn test_validity_window(
            issued_at in 0i64..4_000_000_000,
            expiry in 0u64..100_000,
            offset in 0u64..200_000,
        ) {
            let auth = Authenticator::new(
                AuthConfig::new("k", PASSWORD).with_token_expiry(expiry),
            );
            let token = auth.issue_token_at(PASSWORD, issued_at).unwrap();
            let now = issued_at + offset as i64;
            prop_assert_eq!(auth.validate_token_at(&token, now), offset <= expiry);
        }

        /// Tokens do not validate under a different secret
        #[test]
        fn test_secret_isolation(
            s1 in "[a-z0-9]{1,16}",
            s2 in "[a-z0-9]{1,16}",
        ) {
            prop_assume!(s1 != s2);
            let issuer = Authenticator::new(AuthConfig::new(s1.as_str(), PASSWORD));
            let validator = Authenticator::new(AuthConfig::new(s2.as_str(), PASSWORD));
            let token = issuer.issue_token(PASSWORD).unwrap();
            prop_assert!(!validator.validate_token(&token));
        }
    }
}
