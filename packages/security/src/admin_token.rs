// ABOUTME: HMAC-SHA256 admin session tokens of the form base64(payload).hex(signature)
// ABOUTME: The payload is `admin:{expires_at_ms}` and the signing key is the admin password

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the signed admin token
pub const ADMIN_TOKEN_COOKIE: &str = "admin_token";

/// Lifetime of an admin session
pub const ADMIN_TOKEN_TTL_HOURS: i64 = 24;

const PAYLOAD_SUBJECT: &str = "admin";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,
    #[error("Invalid token signature")]
    BadSignature,
    #[error("Token expired")]
    Expired,
    #[error("Signing key rejected: {0}")]
    Key(String),
}

/// Issues and verifies admin tokens with a shared secret
#[derive(Clone)]
pub struct AdminTokenSigner {
    secret: Vec<u8>,
}

impl std::fmt::Debug for AdminTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminTokenSigner").finish_non_exhaustive()
    }
}

impl AdminTokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn sign(&self, payload: &str) -> Result<Vec<u8>, TokenError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| TokenError::Key(e.to_string()))?;
        mac.update(payload.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Issues a token valid for [`ADMIN_TOKEN_TTL_HOURS`] from `now`.
    /// Returns the token and its expiry.
    pub fn issue(&self, now: DateTime<Utc>) -> Result<(String, DateTime<Utc>), TokenError> {
        let expires_at = now + Duration::hours(ADMIN_TOKEN_TTL_HOURS);
        let payload = format!("{}:{}", PAYLOAD_SUBJECT, expires_at.timestamp_millis());
        let signature = self.sign(&payload)?;
        let token = format!("{}.{}", BASE64.encode(payload.as_bytes()), hex::encode(signature));
        Ok((token, expires_at))
    }

    /// Checks the signature in constant time, then the expiry.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, TokenError> {
        let (encoded_payload, signature_hex) =
            token.split_once('.').ok_or(TokenError::Malformed)?;
        if encoded_payload.is_empty() || signature_hex.is_empty() {
            return Err(TokenError::Malformed);
        }

        let payload_bytes = BASE64
            .decode(encoded_payload)
            .map_err(|_| TokenError::Malformed)?;
        let payload = String::from_utf8(payload_bytes).map_err(|_| TokenError::Malformed)?;

        let expected = hex::encode(self.sign(&payload)?);
        if signature_hex.len() != expected.len()
            || signature_hex.as_bytes().ct_eq(expected.as_bytes()).unwrap_u8() != 1
        {
            debug!("Rejected admin token with bad signature");
            return Err(TokenError::BadSignature);
        }

        let (subject, expires_ms) = payload.split_once(':').ok_or(TokenError::Malformed)?;
        if subject != PAYLOAD_SUBJECT {
            return Err(TokenError::Malformed);
        }
        let expires_ms: i64 = expires_ms.parse().map_err(|_| TokenError::Malformed)?;
        let expires_at = DateTime::<Utc>::from_timestamp_millis(expires_ms).ok_or(TokenError::Malformed)?;

        if now > expires_at {
            return Err(TokenError::Expired);
        }
        Ok(expires_at)
    }

    pub fn is_valid(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.verify(token, now).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_issued_token_verifies() {
        let signer = AdminTokenSigner::new("segredo");
        let (token, expires_at) = signer.issue(now()).unwrap();
        assert_eq!(expires_at, now() + Duration::hours(24));
        assert_eq!(signer.verify(&token, now()), Ok(expires_at));
        assert!(signer.is_valid(&token, expires_at));
    }

    #[test]
    fn test_token_format() {
        let signer = AdminTokenSigner::new("segredo");
        let (token, expires_at) = signer.issue(now()).unwrap();
        let (payload, signature) = token.split_once('.').unwrap();
        let decoded = String::from_utf8(BASE64.decode(payload).unwrap()).unwrap();
        assert_eq!(decoded, format!("admin:{}", expires_at.timestamp_millis()));
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let signer = AdminTokenSigner::new("segredo");
        let (token, expires_at) = signer.issue(now()).unwrap();
        let later = expires_at + Duration::milliseconds(1);
        assert_eq!(signer.verify(&token, later), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let signer = AdminTokenSigner::new("segredo");
        let (token, _) = signer.issue(now()).unwrap();
        let (_, signature) = token.split_once('.').unwrap();
        let forged_payload = BASE64.encode(b"admin:99999999999999");
        let forged = format!("{}.{}", forged_payload, signature);
        assert_eq!(signer.verify(&forged, now()), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let (token, _) = AdminTokenSigner::new("segredo").issue(now()).unwrap();
        let other = AdminTokenSigner::new("outra-senha");
        assert_eq!(other.verify(&token, now()), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let signer = AdminTokenSigner::new("segredo");
        for token in ["", "abc", ".", "abc.", "!!!.deadbeef"] {
            assert_eq!(signer.verify(token, now()), Err(TokenError::Malformed), "{:?}", token);
        }
    }
}
