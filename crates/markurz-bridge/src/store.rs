//! Per-context token cache
//!
//! Every UI component in a context reads the token from one shared store
//! instead of registering its own platform listener. The store seeds itself
//! with a single `GET_COOKIE` round trip (covering contexts created after
//! the last cookie-change broadcast) and is purely reactive afterwards.
//!
//! A seed response and an in-flight broadcast can interleave; the last
//! message to arrive wins. No version reconciliation is attempted.

use tokio::sync::watch;

use crate::message::{Message, Request, Response};
use crate::transport::MessageSender;

pub struct TokenStore {
    value: watch::Sender<Option<String>>,
}

impl TokenStore {
    pub fn new() -> Self {
        let (value, _) = watch::channel(None);
        Self { value }
    }

    /// Ask the background for the current token once. A failed seed leaves
    /// the store signed out rather than erroring; a later broadcast will
    /// correct it.
    pub async fn seed(&self, sender: &dyn MessageSender) {
        match sender.send(Message::Request(Request::GetCookie)).await {
            Ok(Response::Cookie { token }) => self.set(token),
            Ok(other) => {
                tracing::warn!(?other, "Unexpected seed response");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token seed request failed");
            }
        }
    }

    /// Feed one inbound message through the store. Only messages carrying a
    /// `token` field change anything.
    pub fn apply(&self, message: &Message) {
        if let Message::Token(update) = message {
            self.set(update.token.clone());
        }
    }

    pub fn current(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    /// Subscribe to token changes. Subscribers are only woken for distinct
    /// values.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.value.subscribe()
    }

    fn set(&self, token: Option<String>) {
        self.value.send_if_modified(|current| {
            if *current == token {
                return false;
            }
            *current = token;
            true
        });
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::TokenUpdate;
    use crate::{BridgeError, Result};
    use async_trait::async_trait;

    struct FixedSeed {
        token: Option<String>,
    }

    #[async_trait]
    impl MessageSender for FixedSeed {
        async fn send(&self, message: Message) -> Result<Response> {
            assert_eq!(message, Message::Request(Request::GetCookie));
            Ok(Response::Cookie {
                token: self.token.clone(),
            })
        }
    }

    struct FailingSeed;

    #[async_trait]
    impl MessageSender for FailingSeed {
        async fn send(&self, _message: Message) -> Result<Response> {
            Err(BridgeError::BackgroundUnavailable)
        }
    }

    fn token_message(token: Option<&str>) -> Message {
        Message::Token(TokenUpdate {
            token: token.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_seed_then_broadcast_last_wins() {
        let store = TokenStore::new();
        store
            .seed(&FixedSeed {
                token: Some("seeded".to_string()),
            })
            .await;
        assert_eq!(store.current(), Some("seeded".to_string()));

        store.apply(&token_message(Some("broadcast")));
        assert_eq!(store.current(), Some("broadcast".to_string()));

        store.apply(&token_message(None));
        assert_eq!(store.current(), None);
    }

    #[tokio::test]
    async fn test_failed_seed_reads_as_signed_out() {
        let store = TokenStore::new();
        store.seed(&FailingSeed).await;
        assert_eq!(store.current(), None);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = TokenStore::new();
        let mut rx = store.subscribe();

        store.apply(&token_message(Some("bearer-1")));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Some("bearer-1".to_string()));
    }

    #[tokio::test]
    async fn test_equal_value_does_not_notify() {
        let store = TokenStore::new();
        store.apply(&token_message(Some("bearer-1")));

        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.apply(&token_message(Some("bearer-1")));
        assert!(!rx.has_changed().unwrap());

        store.apply(&token_message(Some("bearer-2")));
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_requests_do_not_touch_the_cache() {
        let store = TokenStore::new();
        store.apply(&token_message(Some("bearer-1")));

        store.apply(&Message::Request(Request::GetDom));
        store.apply(&Message::Request(Request::OpenDrawer {
            page_url: "https://example.com".to_string(),
            selection_text: "abc".to_string(),
        }));

        assert_eq!(store.current(), Some("bearer-1".to_string()));
    }
}
