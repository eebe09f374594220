//! Markurz Storage Layer
//!
//! SQLite-backed stand-in for extension-local storage. Preferences are
//! written by the popup, read by every context at startup, and fanned out
//! through a change broadcast that mirrors the platform's storage-change
//! event.

mod database;
mod error;
mod migrations;
mod prefs;

pub use database::Database;
pub use error::StorageError;
pub use prefs::{PrefChange, PrefsStore, SHOW_FAB_KEY};

pub type Result<T> = std::result::Result<T, StorageError>;
