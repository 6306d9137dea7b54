use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use subtle::ConstantTimeEq;

use crate::session::errors::SessionError;
use crate::utils::gen_random_bytes;

/// Check a candidate password against an optional stored hash, then the reference password.
///
/// A malformed stored hash never fails the call; it is logged and the
/// reference comparison decides.
pub(crate) fn verify_password(
    candidate: &str,
    stored_hash: Option<&str>,
    reference: &str,
) -> bool {
    if let Some(hash) = stored_hash {
        if verify_hash(candidate, hash) {
            return true;
        }
    }

    candidate.as_bytes().ct_eq(reference.as_bytes()).into()
}

fn verify_hash(candidate: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Ignoring malformed password hash: {e}");
            false
        }
    }
}

/// Hash a password with Argon2id into a PHC string suitable for `AUTH_PASSWORD_HASH`.
pub fn hash_password(password: &str) -> Result<String, SessionError> {
    let salt = SaltString::encode_b64(&gen_random_bytes(16)?)
        .map_err(|e| SessionError::Crypto(e.to_string()))?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SessionError::Crypto(e.to_string()))?;

    Ok(hash.to_string())
}
