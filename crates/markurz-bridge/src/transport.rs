//! Transport seams
//!
//! Each context codes against these traits rather than the platform's
//! messaging API directly, so the same propagation logic runs over the
//! in-process hub, a test double, or real browser messaging.

use async_trait::async_trait;
use std::sync::Arc;

use crate::message::{Message, Response};
use crate::Result;

/// Platform-assigned tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u32);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A context's inbound message listener.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, message: Message) -> Result<Response>;
}

/// Page/popup side channel to the background context.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, message: Message) -> Result<Response>;
}

/// Addressable channel to one tab's page context.
#[async_trait]
pub trait TabChannel: Send + Sync {
    fn id(&self) -> TabId;

    async fn send(&self, message: Message) -> Result<Response>;
}

/// Live tab lookup at dispatch time. No registry of injected pages is kept;
/// addressing is best-effort against whatever the platform reports.
#[async_trait]
pub trait TabDirectory: Send + Sync {
    /// All tabs that have completed loading.
    async fn loaded_tabs(&self) -> Vec<Arc<dyn TabChannel>>;

    /// The single active, focused, fully-loaded tab, if any.
    async fn focused_tab(&self) -> Option<Arc<dyn TabChannel>>;
}
