//! Simulated extension session
//!
//! Wires the background context, two page contexts and the popup over the
//! in-process hub, then scripts a full session: sign-in, selection,
//! context-menu click, preference toggle, sign-out.

use std::sync::Arc;
use std::time::Duration;

use markurz_extension::handlers::{cookies, menu};
use markurz_extension::{handlers::messages::BackgroundResponder, BackgroundState, Popup};

use markurz_core::{
    sign_session_cookie, Config, LocalHub, MemoryCookieJar, PageContext, ScrollOffset, Selection,
    SelectionRect,
};

const ARTICLE_HTML: &str = "<html><head><title>Weekly Notes</title></head>\
    <body><h1>Release checklist</h1><p>hello world</p></body></html>";
const DOCS_HTML: &str = "<html><head><title>API Reference</title></head>\
    <body><h1>Endpoints</h1></body></html>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    markurz_core::init_logging();

    let config = Config::default();
    let jar = Arc::new(MemoryCookieJar::new());
    let hub = LocalHub::new();

    // Background context; preferences live in the database at the configured
    // path and survive across runs.
    let state = Arc::new(BackgroundState::open(
        config.clone(),
        jar.clone(),
        Arc::new(hub.clone()),
    )?);
    let prefs = state.prefs().clone();
    hub.set_background(Arc::new(BackgroundResponder::new(state.clone())));
    let observer = cookies::spawn_observer(state);
    tracing::info!(menu = ?menu::registration(), "Background ready");

    // Two pages with injected content scripts.
    let article = PageContext::new(prefs.show_fab()?);
    article.set_document("https://example.com/notes", ARTICLE_HTML);
    let article_tab = hub.register_tab(article.clone());
    article.seed(hub.sender().as_ref()).await;
    let article_prefs = article.listen_prefs(prefs.subscribe());

    let docs = PageContext::new(prefs.show_fab()?);
    docs.set_document("https://example.com/docs", DOCS_HTML);
    hub.register_tab(docs.clone());
    docs.seed(hub.sender().as_ref()).await;
    let docs_prefs = docs.listen_prefs(prefs.subscribe());

    hub.focus(article_tab);
    tracing::info!(
        article = article.token_store().current().is_some(),
        docs = docs.token_store().current().is_some(),
        "Pages seeded (no session yet)"
    );

    // The user signs in on the companion app; the auth cookie appears.
    let cookie = sign_session_cookie(config.session_secret.as_bytes(), "demo-access-token", None);
    jar.set(&config.cookie_domain, &config.cookie_name, &cookie);
    settle().await;
    tracing::info!(
        article = ?article.token_store().current(),
        "Token propagated to every open tab"
    );

    // A selection on the article page reveals the fab.
    article.on_selection(
        &Selection::new(
            "hello world",
            SelectionRect {
                x: 120.0,
                y: 380.0,
                width: 96.0,
                height: 18.0,
            },
        ),
        ScrollOffset { x: 0.0, y: 250.0 },
    );
    tracing::info!(fab = article.fab_visible(), "Selection made");

    // Right-click "Mark with Markurz" on the focused tab.
    menu::handle_click(
        &hub,
        menu::MenuClick {
            page_url: article.url(),
            selection_text: "hello world".to_string(),
        },
    )
    .await;
    tracing::info!(
        drawer = article.drawer_open(),
        text = %article.highlighted_text(),
        "Drawer opened from the context menu"
    );
    article.close_drawer();

    // The popup turns the fab off; every page follows.
    let popup = Popup::connect(hub.sender().as_ref(), prefs.clone()).await;
    tracing::info!(signed_in = popup.signed_in(), "Popup opened");
    popup.set_show_fab(false)?;
    settle().await;
    article.on_selection(
        &Selection::new(
            "still selectable",
            SelectionRect {
                x: 10.0,
                y: 40.0,
                width: 120.0,
                height: 18.0,
            },
        ),
        ScrollOffset::default(),
    );
    tracing::info!(fab = article.fab_visible(), "Fab hidden by preference");

    // Turn the fab back on so the persisted preference does not carry the
    // demo's toggle into the next run.
    popup.set_show_fab(true)?;

    // Sign out: the cookie disappears, every tab reads as signed out.
    jar.remove(&config.cookie_domain, &config.cookie_name);
    settle().await;
    tracing::info!(
        article = article.token_store().current().is_some(),
        docs = docs.token_store().current().is_some(),
        "Signed out everywhere"
    );

    article_prefs.abort();
    docs_prefs.abort();
    observer.abort();
    Ok(())
}

/// Give the spawned observer and listener tasks a beat to drain.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
