//! Markurz Core
//!
//! Shared configuration and error plumbing for the extension workspace, plus
//! re-exports of the member crates' public surfaces.

mod config;
mod error;

pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use markurz_api::{ApiClient, ApiError, TaskInput};
pub use markurz_bridge::{
    BridgeError, BroadcastDispatcher, DomSnapshot, LocalHub, Message, MessageHandler,
    MessageSender, Request, Response, TabChannel, TabDirectory, TabId, TokenStore, TokenUpdate,
};
pub use markurz_overlay::{
    AnchorPoint, OverlayController, PageContext, ScrollOffset, Selection, SelectionRect,
};
pub use markurz_session::{
    sign_session_cookie, ChangeCause, CookieChange, CookieEvent, CookieJar, CookieObserver,
    CookieRecord, MemoryCookieJar, SessionError, TokenDecoder,
};
pub use markurz_storage::{Database, PrefChange, PrefsStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
