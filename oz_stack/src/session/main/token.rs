//! Signed, timestamped session tokens
//!
//! A token is `payload.timestamp.signature`, each part base64url without
//! padding. The payload is the JSON claim set, the timestamp the issuance
//! time in Unix seconds and the signature an HMAC-SHA256 over the first two
//! parts. Nothing is kept server side: validity is the signature plus the age.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::session::errors::SessionError;
use crate::utils::{base64url_decode, base64url_encode};

type HmacSha256 = Hmac<Sha256>;

const TOKEN_SALT: &[u8] = b"oz-stack.auth-token";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TokenClaims {
    #[serde(default)]
    authenticated: bool,
}

fn signing_key(secret: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(TOKEN_SALT);
    hasher.update(b"signer");
    hasher.update(secret);
    hasher.finalize().to_vec()
}

fn new_mac(secret: &[u8]) -> Result<HmacSha256, SessionError> {
    HmacSha256::new_from_slice(&signing_key(secret))
        .map_err(|e| SessionError::Crypto(e.to_string()))
}

fn encode_timestamp(issued_at: u64) -> String {
    let bytes = issued_at.to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len() - 1);
    base64url_encode(&bytes[first..])
}

fn decode_timestamp(encoded: &str) -> Option<u64> {
    let bytes = base64url_decode(encoded).ok()?;
    if bytes.is_empty() || bytes.len() > 8 {
        return None;
    }
    let mut buf = [0u8; 8];
    buf[8 - bytes.len()..].copy_from_slice(&bytes);
    Some(u64::from_be_bytes(buf))
}

/// Sign an authenticated claim issued at `issued_at` (Unix seconds).
pub(crate) fn sign_token(secret: &[u8], issued_at: i64) -> Result<String, SessionError> {
    let issued_at = u64::try_from(issued_at)
        .map_err(|_| SessionError::Crypto(format!("Invalid issue time: {issued_at}")))?;

    let claims = serde_json::to_vec(&TokenClaims {
        authenticated: true,
    })
    .map_err(|e| SessionError::Crypto(e.to_string()))?;

    let signed_part = format!(
        "{}.{}",
        base64url_encode(&claims),
        encode_timestamp(issued_at)
    );

    let mut mac = new_mac(secret)?;
    mac.update(signed_part.as_bytes());
    let signature = mac.finalize().into_bytes();

    Ok(format!("{signed_part}.{}", base64url_encode(&signature)))
}

/// Check signature and age of `token` at time `now` (Unix seconds).
///
/// Malformed, tampered, future-dated and expired tokens all yield `false`.
pub(crate) fn verify_token(secret: &[u8], token: &str, max_age: u64, now: i64) -> bool {
    let mut parts = token.split('.');
    let (Some(payload), Some(timestamp), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        tracing::debug!("Token does not have three parts");
        return false;
    };

    let Ok(signature) = base64url_decode(signature) else {
        tracing::debug!("Token signature is not base64url");
        return false;
    };

    let Ok(mut mac) = new_mac(secret) else {
        return false;
    };
    mac.update(payload.as_bytes());
    mac.update(b".");
    mac.update(timestamp.as_bytes());
    if mac.verify_slice(&signature).is_err() {
        tracing::debug!("Token signature mismatch");
        return false;
    }

    let Some(issued_at) = decode_timestamp(timestamp) else {
        tracing::debug!("Token timestamp is malformed");
        return false;
    };

    let age = i128::from(now) - i128::from(issued_at);
    if age < 0 || age > i128::from(max_age) {
        tracing::debug!("Token age {age}s outside of 0..={max_age}s");
        return false;
    }

    match base64url_decode(payload)
        .ok()
        .and_then(|bytes| serde_json::from_slice::<TokenClaims>(&bytes).ok())
    {
        Some(claims) => claims.authenticated,
        None => {
            tracing::debug!("Token payload is not a claim set");
            false
        }
    }
}
