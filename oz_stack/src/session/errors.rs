use thiserror::Error;

use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    /// Raised by [`crate::Authenticator::require`] when a request carries no valid session
    #[error("Invalid authentication credentials")]
    Unauthorized,

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_message() {
        assert_eq!(
            SessionError::Unauthorized.to_string(),
            "Invalid authentication credentials"
        );
    }

    #[test]
    fn test_from_util_error() {
        let err: SessionError = UtilError::Cookie("bad".to_string()).into();
        match err {
            SessionError::Utils(UtilError::Cookie(msg)) => assert_eq!(msg, "bad"),
            other => panic!("Expected Utils(Cookie), got {other:?}"),
        }
    }
}
