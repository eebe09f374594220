//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Session error: {0}")]
    Session(#[from] markurz_session::SessionError),

    #[error("Bridge error: {0}")]
    Bridge(#[from] markurz_bridge::BridgeError),

    #[error("Storage error: {0}")]
    Storage(#[from] markurz_storage::StorageError),

    #[error("API error: {0}")]
    Api(#[from] markurz_api::ApiError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

// Implement std::io::Error conversion for fs operations
impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
