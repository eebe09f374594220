//! Cookie change observer loop
//!
//! Cookie change -> observer -> decoder -> dispatcher. The pipeline never
//! errors: undecodable cookies broadcast as signed-out, and dropped change
//! records (a lagging receiver) are logged and skipped.

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use markurz_core::CookieEvent;

use crate::state::BackgroundState;

pub fn spawn_observer(state: Arc<BackgroundState>) -> JoinHandle<()> {
    let mut changes = state.jar().changes();

    tokio::spawn(async move {
        loop {
            let change = match changes.recv().await {
                Ok(change) => change,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Cookie change feed lagged");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let Some(event) = state.observer().interpret(&change) else {
                continue;
            };

            let token = match event {
                CookieEvent::Updated(value) => state.decoder().decode(Some(&value)),
                CookieEvent::Cleared => None,
            };

            tracing::info!(signed_in = token.is_some(), "Session changed");
            state.dispatcher().broadcast(token).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::messages::BackgroundResponder;
    use markurz_core::{
        sign_session_cookie, Config, Database, LocalHub, MemoryCookieJar, PageContext, PrefsStore,
    };
    use std::path::PathBuf;
    use std::time::Duration;

    async fn wait_for<F: Fn() -> bool>(condition: F) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while !condition() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    #[tokio::test]
    async fn test_cookie_change_reaches_page_stores() {
        let config = Config::new(PathBuf::from("/tmp"));
        let jar = Arc::new(MemoryCookieJar::new());
        let hub = LocalHub::new();
        let prefs = PrefsStore::new(Database::open_in_memory().unwrap());

        let state = Arc::new(BackgroundState::new(
            config.clone(),
            jar.clone(),
            Arc::new(hub.clone()),
            prefs,
        ));
        hub.set_background(Arc::new(BackgroundResponder::new(state.clone())));
        let observer = spawn_observer(state);

        let page = PageContext::new(true);
        hub.register_tab(page.clone());

        // Sign in: a valid signed cookie lands in the jar.
        let cookie = sign_session_cookie(config.session_secret.as_bytes(), "bearer-1", None);
        jar.set(&config.cookie_domain, &config.cookie_name, &cookie);
        wait_for(|| page.token_store().current() == Some("bearer-1".to_string())).await;

        // Sign out: the cookie is removed.
        jar.remove(&config.cookie_domain, &config.cookie_name);
        wait_for(|| page.token_store().current().is_none()).await;

        observer.abort();
    }

    #[tokio::test]
    async fn test_garbage_cookie_broadcasts_signed_out() {
        let config = Config::new(PathBuf::from("/tmp"));
        let jar = Arc::new(MemoryCookieJar::new());
        let hub = LocalHub::new();
        let prefs = PrefsStore::new(Database::open_in_memory().unwrap());

        let state = Arc::new(BackgroundState::new(
            config.clone(),
            jar.clone(),
            Arc::new(hub.clone()),
            prefs,
        ));
        let observer = spawn_observer(state);

        let page = PageContext::new(true);
        page.token_store().apply(&markurz_core::Message::Token(
            markurz_core::TokenUpdate {
                token: Some("stale".to_string()),
            },
        ));
        hub.register_tab(page.clone());

        jar.set(&config.cookie_domain, &config.cookie_name, "not-a-signed-cookie");
        wait_for(|| page.token_store().current().is_none()).await;

        observer.abort();
    }
}
