//! Token Gate
//!
//! Issues and verifies stateless bearer tokens. A token is
//! `base64url(JSON claims) + "." + base64url(HMAC-SHA256 signature)`,
//! binding the user's id, email, and admin flag for a fixed 24-hour
//! window from issuance. There is no revocation list; compromise is
//! mitigated only by the expiry.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::error::{AuthError, AuthResult};

/// Claims carried by a bearer token
///
/// The admin flag is a snapshot at issuance; admin routes re-read the
/// live record through the role gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// User id
    pub id: Uuid,
    /// Normalized email
    pub email: String,
    /// Admin flag at issuance time
    pub is_admin: bool,
    /// Expiry, milliseconds since the Unix epoch
    pub exp: i64,
}

impl TokenClaims {
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.exp
    }
}

/// Issues and verifies signed claim tokens
pub struct TokenGate {
    config: Arc<AuthConfig>,
}

impl TokenGate {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Issue a token for a verified identity, valid for the configured TTL
    pub fn issue(&self, user: &User) -> AuthResult<String> {
        let claims = TokenClaims {
            id: *user.user_id.as_uuid(),
            email: user.email.as_str().to_string(),
            is_admin: user.is_admin,
            exp: Utc::now().timestamp_millis() + self.config.token_ttl_ms(),
        };

        let payload = serde_json::to_vec(&claims)
            .map_err(|e| AuthError::Internal(format!("Failed to encode claims: {e}")))?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);

        let signature = self.sign(payload_b64.as_bytes());

        Ok(format!(
            "{}.{}",
            payload_b64,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verify a token against the current clock
    pub fn verify(&self, token: &str) -> AuthResult<TokenClaims> {
        self.verify_at(token, Utc::now().timestamp_millis())
    }

    /// Verify a token against an explicit clock (testable expiry boundary)
    ///
    /// The signature is checked before the payload is trusted; a
    /// malformed, forged, or expired token all fail the same way.
    pub fn verify_at(&self, token: &str, now_ms: i64) -> AuthResult<TokenClaims> {
        let Some((payload_b64, signature_b64)) = token.split_once('.') else {
            return Err(AuthError::InvalidToken);
        };

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| AuthError::InvalidToken)?;

        let mut mac = Hmac::<Sha256>::new_from_slice(&self.config.token_secret)
            .expect("HMAC can take key of any size");
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidToken)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AuthError::InvalidToken)?;

        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::InvalidToken)?;

        if claims.is_expired_at(now_ms) {
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }

    /// HMAC-SHA256 over the encoded payload
    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.config.token_secret)
            .expect("HMAC can take key of any size");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}
