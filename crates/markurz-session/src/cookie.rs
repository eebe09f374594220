//! Auth cookie observation
//!
//! Change records arrive from the platform's cookie facility. The observer
//! filters them to the configured domain/name pair and collapses them into
//! session events. One platform quirk matters here: rewriting a cookie with
//! a fresh value first reports a removal with cause `overwrite`. That is not
//! a logout and must not clear the session.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// A cookie as reported by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieRecord {
    pub domain: String,
    pub name: String,
    pub value: String,
}

/// Why a cookie change was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCause {
    Explicit,
    Overwrite,
    Expired,
    ExpiredOverwrite,
    Evicted,
}

/// A raw change record from the platform's cookie-change facility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieChange {
    pub cookie: CookieRecord,
    pub removed: bool,
    pub cause: ChangeCause,
}

/// Session-level interpretation of a cookie change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieEvent {
    /// The cookie has a (possibly new) value to decode.
    Updated(String),
    /// The session ended; the token must be cleared.
    Cleared,
}

/// Filters cookie changes down to the one auth cookie this system cares
/// about.
pub struct CookieObserver {
    domain: String,
    name: String,
}

impl CookieObserver {
    pub fn new(domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            name: name.into(),
        }
    }

    /// Interpret a raw change record. Returns `None` for cookies other than
    /// the configured domain/name pair.
    pub fn interpret(&self, change: &CookieChange) -> Option<CookieEvent> {
        if change.cookie.domain != self.domain || change.cookie.name != self.name {
            return None;
        }

        if change.removed {
            // A removal with cause `overwrite` precedes the rewrite of the
            // same cookie. Propagate the value, not a logout.
            if change.cause == ChangeCause::Overwrite {
                return Some(CookieEvent::Updated(change.cookie.value.clone()));
            }
            return Some(CookieEvent::Cleared);
        }

        Some(CookieEvent::Updated(change.cookie.value.clone()))
    }
}

/// Read access to the platform cookie store plus a change feed.
#[async_trait]
pub trait CookieJar: Send + Sync {
    async fn get(&self, domain: &str, name: &str) -> Option<String>;

    /// Subscribe to raw change records. Every subscriber sees every change.
    fn changes(&self) -> broadcast::Receiver<CookieChange>;
}

/// In-memory cookie jar backing the simulated platform and the tests.
pub struct MemoryCookieJar {
    cookies: Arc<RwLock<HashMap<(String, String), String>>>,
    changes: broadcast::Sender<CookieChange>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            cookies: Arc::new(RwLock::new(HashMap::new())),
            changes,
        }
    }

    /// Set a cookie, emitting the same change sequence the platform does:
    /// an existing value is first reported removed with cause `overwrite`,
    /// then the new value is reported set.
    pub fn set(&self, domain: &str, name: &str, value: &str) {
        let key = (domain.to_string(), name.to_string());
        let previous = self.cookies.write().insert(key, value.to_string());

        if let Some(previous) = previous {
            let _ = self.changes.send(CookieChange {
                cookie: CookieRecord {
                    domain: domain.to_string(),
                    name: name.to_string(),
                    value: previous,
                },
                removed: true,
                cause: ChangeCause::Overwrite,
            });
        }

        let _ = self.changes.send(CookieChange {
            cookie: CookieRecord {
                domain: domain.to_string(),
                name: name.to_string(),
                value: value.to_string(),
            },
            removed: false,
            cause: ChangeCause::Explicit,
        });
    }

    /// Remove a cookie (sign-out).
    pub fn remove(&self, domain: &str, name: &str) {
        let key = (domain.to_string(), name.to_string());
        let Some(value) = self.cookies.write().remove(&key) else {
            return;
        };

        let _ = self.changes.send(CookieChange {
            cookie: CookieRecord {
                domain: domain.to_string(),
                name: name.to_string(),
                value,
            },
            removed: true,
            cause: ChangeCause::Explicit,
        });
    }
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CookieJar for MemoryCookieJar {
    async fn get(&self, domain: &str, name: &str) -> Option<String> {
        self.cookies
            .read()
            .get(&(domain.to_string(), name.to_string()))
            .cloned()
    }

    fn changes(&self) -> broadcast::Receiver<CookieChange> {
        self.changes.subscribe()
    }
}
