//! API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Not signed in")]
    Unauthenticated,

    #[error("GraphQL error: {0}")]
    GraphQl(String),
}
