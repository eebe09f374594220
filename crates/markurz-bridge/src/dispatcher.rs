//! Token broadcast fan-out

use futures_util::future::join_all;
use std::sync::Arc;

use crate::message::{Message, TokenUpdate};
use crate::transport::TabDirectory;

/// Pushes token updates to every loaded tab. Delivery is best-effort: a tab
/// that navigated away or never injected a listener is logged and skipped,
/// with no acknowledgement and no retry.
pub struct BroadcastDispatcher {
    tabs: Arc<dyn TabDirectory>,
}

impl BroadcastDispatcher {
    pub fn new(tabs: Arc<dyn TabDirectory>) -> Self {
        Self { tabs }
    }

    pub async fn broadcast(&self, token: Option<String>) {
        let tabs = self.tabs.loaded_tabs().await;
        tracing::debug!(tabs = tabs.len(), signed_in = token.is_some(), "Broadcasting token");

        let sends = tabs.into_iter().map(|tab| {
            let update = Message::Token(TokenUpdate {
                token: token.clone(),
            });
            async move { (tab.id(), tab.send(update).await) }
        });

        for (id, result) in join_all(sends).await {
            if let Err(e) = result {
                tracing::warn!(tab = %id, error = %e, "Token delivery failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::LocalHub;
    use crate::message::{Message, Response};
    use crate::transport::MessageHandler;
    use crate::Result;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct Recorder {
        tokens: Mutex<Vec<Option<String>>>,
    }

    impl Recorder {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                tokens: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl MessageHandler for Recorder {
        async fn handle(&self, message: Message) -> Result<Response> {
            if let Message::Token(update) = message {
                self.tokens.lock().push(update.token);
            }
            Ok(Response::Ack)
        }
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_loaded_tabs() {
        let hub = LocalHub::new();
        let first = Recorder::new();
        let second = Recorder::new();
        hub.register_tab(first.clone());
        hub.register_tab(second.clone());

        let dispatcher = BroadcastDispatcher::new(Arc::new(hub));
        dispatcher.broadcast(Some("bearer-1".to_string())).await;

        assert_eq!(*first.tokens.lock(), vec![Some("bearer-1".to_string())]);
        assert_eq!(*second.tokens.lock(), vec![Some("bearer-1".to_string())]);
    }

    #[tokio::test]
    async fn test_one_dead_tab_does_not_abort_the_rest() {
        let hub = LocalHub::new();
        let first = Recorder::new();
        let second = Recorder::new();
        let third = Recorder::new();
        hub.register_tab(first.clone());
        let dead = hub.register_tab(second.clone());
        hub.register_tab(third.clone());
        hub.disconnect(dead);

        let dispatcher = BroadcastDispatcher::new(Arc::new(hub));
        dispatcher.broadcast(None).await;

        assert_eq!(*first.tokens.lock(), vec![None]);
        assert!(second.tokens.lock().is_empty());
        assert_eq!(*third.tokens.lock(), vec![None]);
    }

    #[tokio::test]
    async fn test_loading_tabs_are_skipped() {
        let hub = LocalHub::new();
        let ready = Recorder::new();
        let loading = Recorder::new();
        hub.register_tab(ready.clone());
        let id = hub.register_tab(loading.clone());
        hub.set_load_complete(id, false);

        let dispatcher = BroadcastDispatcher::new(Arc::new(hub));
        dispatcher.broadcast(Some("bearer-2".to_string())).await;

        assert_eq!(*ready.tokens.lock(), vec![Some("bearer-2".to_string())]);
        assert!(loading.tokens.lock().is_empty());
    }
}
