//! Signed session cookie decoding
//!
//! The companion web app writes a compact signed token into the auth cookie:
//! `base64url(header).base64url(payload).base64url(hmac_sha256(secret, header "." payload))`
//! with the bearer token at `user.accessToken` in the payload and an optional
//! `exp` unix timestamp. Decoding never surfaces an error into the broadcast
//! path; any failure reads as "signed out".

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{Result, SessionError};

type HmacSha256 = Hmac<Sha256>;

pub struct TokenDecoder {
    secret: Vec<u8>,
}

impl TokenDecoder {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Decode a cookie value into the embedded bearer token.
    ///
    /// `None` passes through. Malformed or expired cookies and signature
    /// mismatches all degrade to `None`; the UI has no better recovery than
    /// treating the user as unauthenticated.
    pub fn decode(&self, cookie_value: Option<&str>) -> Option<String> {
        let value = cookie_value?;

        match self.verify(value) {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::debug!(error = %e, "Session cookie rejected");
                None
            }
        }
    }

    fn verify(&self, value: &str) -> Result<String> {
        let mut parts = value.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(SessionError::Malformed(
                "expected header.payload.signature".to_string(),
            ));
        };

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| SessionError::InvalidSignature)?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());

        let signature = URL_SAFE_NO_PAD.decode(signature)?;
        mac.verify_slice(&signature)
            .map_err(|_| SessionError::InvalidSignature)?;

        let payload: serde_json::Value = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload)?)?;

        if let Some(exp) = payload.get("exp").and_then(|v| v.as_i64()) {
            if exp <= chrono::Utc::now().timestamp() {
                return Err(SessionError::Expired);
            }
        }

        payload
            .get("user")
            .and_then(|u| u.get("accessToken"))
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| SessionError::Malformed("missing user.accessToken".to_string()))
    }
}

/// Mint a signed session cookie the way the companion app's backend does.
/// Used by the demo harness and the tests.
pub fn sign_session_cookie(secret: &[u8], access_token: &str, exp: Option<i64>) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#);

    let mut payload = serde_json::json!({ "user": { "accessToken": access_token } });
    if let Some(exp) = exp {
        payload["exp"] = serde_json::json!(exp);
    }
    let payload = URL_SAFE_NO_PAD.encode(payload.to_string());

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    format!("{header}.{payload}.{signature}")
}
