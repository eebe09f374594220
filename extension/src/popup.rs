//! Popup surface
//!
//! Popups are short-lived: each one seeds its token store over the bridge on
//! open, shows the signed-in state, and owns the `showFab` toggle. Writes go
//! through the shared preference store, whose change broadcast reaches every
//! page context.

use std::sync::Arc;

use markurz_core::{Config, MessageSender, PrefsStore, StorageError, TokenStore};

pub struct Popup {
    store: Arc<TokenStore>,
    prefs: PrefsStore,
}

impl Popup {
    pub async fn connect(sender: &dyn MessageSender, prefs: PrefsStore) -> Self {
        let store = Arc::new(TokenStore::new());
        store.seed(sender).await;

        Self { store, prefs }
    }

    pub fn signed_in(&self) -> bool {
        self.store.current().is_some()
    }

    /// Where the sign-in link points when no session exists.
    pub fn sign_in_url(&self, config: &Config) -> Option<String> {
        (!self.signed_in()).then(|| config.sign_in_url())
    }

    pub fn show_fab(&self) -> Result<bool, StorageError> {
        self.prefs.show_fab()
    }

    pub fn set_show_fab(&self, show_fab: bool) -> Result<(), StorageError> {
        self.prefs.set_show_fab(show_fab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markurz_core::{BridgeError, Database, Message, Response};
    use async_trait::async_trait;

    struct SignedIn;

    #[async_trait]
    impl MessageSender for SignedIn {
        async fn send(&self, _message: Message) -> Result<Response, BridgeError> {
            Ok(Response::Cookie {
                token: Some("bearer-1".to_string()),
            })
        }
    }

    struct SignedOut;

    #[async_trait]
    impl MessageSender for SignedOut {
        async fn send(&self, _message: Message) -> Result<Response, BridgeError> {
            Ok(Response::Cookie { token: None })
        }
    }

    fn prefs() -> PrefsStore {
        PrefsStore::new(Database::open_in_memory().unwrap())
    }

    #[tokio::test]
    async fn test_signed_in_popup() {
        let popup = Popup::connect(&SignedIn, prefs()).await;
        let config = Config::new(std::path::PathBuf::from("/tmp"));

        assert!(popup.signed_in());
        assert_eq!(popup.sign_in_url(&config), None);
    }

    #[tokio::test]
    async fn test_signed_out_popup_links_to_sign_in() {
        let popup = Popup::connect(&SignedOut, prefs()).await;
        let config = Config::new(std::path::PathBuf::from("/tmp"));

        assert!(!popup.signed_in());
        assert_eq!(
            popup.sign_in_url(&config),
            Some("https://markurz.app/sign-in".to_string())
        );
    }

    #[tokio::test]
    async fn test_toggle_writes_through() {
        let prefs = prefs();
        let mut rx = prefs.subscribe();
        let popup = Popup::connect(&SignedOut, prefs.clone()).await;

        assert!(popup.show_fab().unwrap());
        popup.set_show_fab(false).unwrap();

        assert!(!popup.show_fab().unwrap());
        assert!(!rx.recv().await.unwrap().show_fab);
    }
}
