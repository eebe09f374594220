//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Malformed session cookie: {0}")]
    Malformed(String),

    #[error("Signature verification failed")]
    InvalidSignature,

    #[error("Session token expired")]
    Expired,

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
