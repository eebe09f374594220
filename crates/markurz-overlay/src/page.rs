//! Per-tab page context
//!
//! Owns the single inbound dispatch loop for one tab. Every message is fed
//! through the shared token store first, then routed; UI components read the
//! store and the controller instead of registering their own listeners.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use markurz_bridge::{Message, MessageHandler, MessageSender, Request, Response, TokenStore};
use markurz_storage::PrefChange;

use crate::controller::OverlayController;
use crate::dom;
use crate::selection::{ScrollOffset, Selection};

#[derive(Default)]
struct Document {
    url: String,
    html: String,
}

pub struct PageContext {
    store: Arc<TokenStore>,
    controller: Mutex<OverlayController>,
    document: RwLock<Document>,
}

impl PageContext {
    /// `show_fab` is the preference value read at content-script startup.
    pub fn new(show_fab: bool) -> Arc<Self> {
        Arc::new(Self {
            store: Arc::new(TokenStore::new()),
            controller: Mutex::new(OverlayController::new(show_fab)),
            document: RwLock::new(Document::default()),
        })
    }

    /// The page this context is injected into.
    pub fn set_document(&self, url: impl Into<String>, html: impl Into<String>) {
        let mut document = self.document.write();
        document.url = url.into();
        document.html = html.into();
    }

    pub fn url(&self) -> String {
        self.document.read().url.clone()
    }

    /// One-time token seed from the background, then forward the result to
    /// the controller.
    pub async fn seed(&self, sender: &dyn MessageSender) {
        self.store.seed(sender).await;
        self.controller.lock().on_token(self.store.current().as_deref());
    }

    pub fn token_store(&self) -> Arc<TokenStore> {
        Arc::clone(&self.store)
    }

    /// React to preference writes from the popup.
    pub fn listen_prefs(self: &Arc<Self>, mut rx: broadcast::Receiver<PrefChange>) -> JoinHandle<()> {
        let page = Arc::clone(self);
        tokio::spawn(async move {
            while let Ok(change) = rx.recv().await {
                page.apply_pref(change);
            }
        })
    }

    pub fn apply_pref(&self, change: PrefChange) {
        self.controller.lock().set_show_fab(change.show_fab);
    }

    // Selection plumbing, driven by the page's pointer/selection events.

    pub fn on_selection(&self, selection: &Selection, scroll: ScrollOffset) {
        self.controller.lock().on_selection(selection, scroll);
    }

    pub fn on_selection_cleared(&self) {
        self.controller.lock().on_selection_cleared();
    }

    pub fn open_drawer_from_fab(&self) {
        self.controller.lock().open_drawer_from_fab();
    }

    pub fn close_drawer(&self) {
        self.controller.lock().close_drawer();
    }

    pub fn begin_sign_in(&self) {
        self.controller.lock().begin_sign_in();
    }

    // Read-only views for the rendered overlay.

    pub fn drawer_open(&self) -> bool {
        self.controller.lock().drawer_open()
    }

    pub fn fab_visible(&self) -> bool {
        self.controller.lock().fab_visible()
    }

    pub fn highlighted_text(&self) -> String {
        self.controller.lock().highlighted_text().to_string()
    }
}

#[async_trait]
impl MessageHandler for PageContext {
    async fn handle(&self, message: Message) -> markurz_bridge::Result<Response> {
        self.store.apply(&message);

        match message {
            Message::Token(update) => {
                self.controller.lock().on_token(update.token.as_deref());
                Ok(Response::Ack)
            }
            Message::Request(Request::OpenDrawer {
                page_url,
                selection_text,
            }) => {
                tracing::debug!(page_url = %page_url, "Drawer requested from context menu");
                let title = dom::snapshot(&self.document.read().html).title;
                self.controller.lock().on_open_drawer(&selection_text, &title);
                Ok(Response::Ack)
            }
            Message::Request(Request::GetDom) => {
                let html = self.document.read().html.clone();
                Ok(Response::Dom(dom::snapshot(&html)))
            }
            // Background-bound request; nothing for a page to answer.
            Message::Request(Request::GetCookie) => Ok(Response::Ack),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionRect;
    use markurz_bridge::{DomSnapshot, TokenUpdate};
    use markurz_storage::{Database, PrefsStore};

    const PAGE_HTML: &str =
        "<html><head><title>Example Page</title></head><body><h1>Top Story</h1></body></html>";

    fn selection(text: &str) -> Selection {
        Selection::new(
            text,
            SelectionRect {
                x: 0.0,
                y: 0.0,
                width: 50.0,
                height: 10.0,
            },
        )
    }

    #[tokio::test]
    async fn test_open_drawer_message_with_selection() {
        let page = PageContext::new(true);
        page.set_document("https://example.com/article", PAGE_HTML);

        let response = page
            .handle(Message::Request(Request::OpenDrawer {
                page_url: "https://example.com/article".to_string(),
                selection_text: "abc".to_string(),
            }))
            .await
            .unwrap();

        assert_eq!(response, Response::Ack);
        assert!(page.drawer_open());
        assert_eq!(page.highlighted_text(), "abc");
    }

    #[tokio::test]
    async fn test_open_drawer_message_falls_back_to_title() {
        let page = PageContext::new(true);
        page.set_document("https://example.com/article", PAGE_HTML);

        page.handle(Message::Request(Request::OpenDrawer {
            page_url: "https://example.com/article".to_string(),
            selection_text: String::new(),
        }))
        .await
        .unwrap();

        assert_eq!(page.highlighted_text(), "Example Page");
    }

    #[tokio::test]
    async fn test_get_dom_snapshot() {
        let page = PageContext::new(true);
        page.set_document("https://example.com", PAGE_HTML);

        let response = page.handle(Message::Request(Request::GetDom)).await.unwrap();

        assert_eq!(
            response,
            Response::Dom(DomSnapshot {
                title: "Example Page".to_string(),
                headlines: vec!["Top Story".to_string()],
            })
        );
    }

    #[tokio::test]
    async fn test_token_message_updates_store_and_controller() {
        let page = PageContext::new(true);

        page.handle(Message::Token(TokenUpdate {
            token: Some("bearer-1".to_string()),
        }))
        .await
        .unwrap();

        assert_eq!(page.token_store().current(), Some("bearer-1".to_string()));
        assert!(page.controller.lock().signed_in());
    }

    #[tokio::test]
    async fn test_pref_change_hides_fab_mid_selection() {
        let page = PageContext::new(true);
        page.on_selection(&selection("hello"), ScrollOffset::default());
        assert!(page.fab_visible());

        page.apply_pref(PrefChange { show_fab: false });
        assert!(!page.fab_visible());
    }

    #[tokio::test]
    async fn test_pref_listener_follows_popup_writes() {
        let page = PageContext::new(true);
        page.on_selection(&selection("hello"), ScrollOffset::default());

        let prefs = PrefsStore::new(Database::open_in_memory().unwrap());
        let handle = page.listen_prefs(prefs.subscribe());

        prefs.set_show_fab(false).unwrap();

        // The listener runs on the spawned task; wait for it to settle.
        tokio::time::timeout(std::time::Duration::from_secs(1), async {
            while page.fab_visible() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("fab should hide after the preference write");

        handle.abort();
    }
}
