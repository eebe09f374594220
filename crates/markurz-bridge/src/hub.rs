//! In-process message hub
//!
//! Simulated platform messaging: page contexts register as tabs, the
//! background registers one handler, and sends are routed directly to the
//! receiving handler. Tabs can be unfocused, mid-load, disconnected (no
//! listener) or closed, which is enough to exercise every delivery-failure
//! path the dispatcher has to survive.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::message::{Message, Response};
use crate::transport::{MessageHandler, MessageSender, TabChannel, TabDirectory, TabId};
use crate::{BridgeError, Result};

struct TabEntry {
    handler: Option<Arc<dyn MessageHandler>>,
    complete: bool,
    focused: bool,
}

struct HubInner {
    background: RwLock<Option<Arc<dyn MessageHandler>>>,
    tabs: RwLock<HashMap<TabId, TabEntry>>,
    next_id: AtomicU32,
}

pub struct LocalHub {
    inner: Arc<HubInner>,
}

impl LocalHub {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(HubInner {
                background: RwLock::new(None),
                tabs: RwLock::new(HashMap::new()),
                next_id: AtomicU32::new(1),
            }),
        }
    }

    /// Install the background context's message handler.
    pub fn set_background(&self, handler: Arc<dyn MessageHandler>) {
        *self.inner.background.write() = Some(handler);
    }

    /// Channel page/popup contexts use to reach the background.
    pub fn sender(&self) -> Arc<dyn MessageSender> {
        Arc::new(BackgroundChannel {
            inner: Arc::clone(&self.inner),
        })
    }

    /// Register a new fully-loaded, unfocused tab.
    pub fn register_tab(&self, handler: Arc<dyn MessageHandler>) -> TabId {
        let id = TabId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.tabs.write().insert(
            id,
            TabEntry {
                handler: Some(handler),
                complete: true,
                focused: false,
            },
        );

        tracing::debug!(tab = %id, "Tab registered");
        id
    }

    /// Give one tab focus, taking it from all others.
    pub fn focus(&self, tab_id: TabId) {
        let mut tabs = self.inner.tabs.write();
        for (id, entry) in tabs.iter_mut() {
            entry.focused = *id == tab_id;
        }
    }

    /// Mark a tab as mid-load or fully loaded.
    pub fn set_load_complete(&self, tab_id: TabId, complete: bool) {
        if let Some(entry) = self.inner.tabs.write().get_mut(&tab_id) {
            entry.complete = complete;
        }
    }

    /// Drop a tab's listener while keeping the tab listed, as happens when a
    /// page navigates away before the content script re-injects.
    pub fn disconnect(&self, tab_id: TabId) {
        if let Some(entry) = self.inner.tabs.write().get_mut(&tab_id) {
            entry.handler = None;
        }
    }

    /// Close a tab entirely.
    pub fn close(&self, tab_id: TabId) {
        self.inner.tabs.write().remove(&tab_id);
    }

    /// Channel to a specific tab.
    pub fn channel(&self, tab_id: TabId) -> Arc<dyn TabChannel> {
        Arc::new(LocalTab {
            id: tab_id,
            inner: Arc::clone(&self.inner),
        })
    }
}

impl Default for LocalHub {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LocalHub {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl TabDirectory for LocalHub {
    async fn loaded_tabs(&self) -> Vec<Arc<dyn TabChannel>> {
        let tabs = self.inner.tabs.read();
        let mut ids: Vec<TabId> = tabs
            .iter()
            .filter(|(_, entry)| entry.complete)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();

        ids.into_iter()
            .map(|id| {
                Arc::new(LocalTab {
                    id,
                    inner: Arc::clone(&self.inner),
                }) as Arc<dyn TabChannel>
            })
            .collect()
    }

    async fn focused_tab(&self) -> Option<Arc<dyn TabChannel>> {
        let id = {
            let tabs = self.inner.tabs.read();
            tabs.iter()
                .find(|(_, entry)| entry.focused && entry.complete)
                .map(|(id, _)| *id)
        }?;

        Some(Arc::new(LocalTab {
            id,
            inner: Arc::clone(&self.inner),
        }))
    }
}

struct LocalTab {
    id: TabId,
    inner: Arc<HubInner>,
}

#[async_trait]
impl TabChannel for LocalTab {
    fn id(&self) -> TabId {
        self.id
    }

    async fn send(&self, message: Message) -> Result<Response> {
        // Clone the handler out of the lock before awaiting it.
        let handler = {
            let tabs = self.inner.tabs.read();
            let entry = tabs.get(&self.id).ok_or(BridgeError::TabClosed(self.id))?;
            entry
                .handler
                .clone()
                .ok_or(BridgeError::NoListener(self.id))?
        };

        handler.handle(message).await
    }
}

struct BackgroundChannel {
    inner: Arc<HubInner>,
}

#[async_trait]
impl MessageSender for BackgroundChannel {
    async fn send(&self, message: Message) -> Result<Response> {
        let handler = self
            .inner
            .background
            .read()
            .clone()
            .ok_or(BridgeError::BackgroundUnavailable)?;

        handler.handle(message).await
    }
}
