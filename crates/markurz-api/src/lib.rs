//! Markurz API Layer
//!
//! Thin GraphQL client for the task backend. The backend performs the actual
//! third-party integrations; this side only attaches the bearer token and
//! turns `UNAUTHENTICATED` responses into a typed error the UI converts into
//! a sign-in navigation.

mod client;
mod error;

pub use client::{ApiClient, TaskInput};
pub use error::ApiError;

pub type Result<T> = std::result::Result<T, ApiError>;
