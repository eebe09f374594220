//! Background context state

use std::sync::Arc;

use markurz_core::{
    BroadcastDispatcher, Config, CookieJar, CookieObserver, Database, PrefsStore, TabDirectory,
    TokenDecoder,
};

/// Everything the background context owns. The session token is never
/// cached here: `current_token` re-reads the cookie jar so answers stay
/// consistent with the platform store.
pub struct BackgroundState {
    config: Config,
    jar: Arc<dyn CookieJar>,
    observer: CookieObserver,
    decoder: TokenDecoder,
    dispatcher: BroadcastDispatcher,
    prefs: PrefsStore,
}

impl BackgroundState {
    /// Open the preference database at the configured path and assemble the
    /// background context around it.
    pub fn open(
        config: Config,
        jar: Arc<dyn CookieJar>,
        tabs: Arc<dyn TabDirectory>,
    ) -> markurz_core::Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let prefs = PrefsStore::new(Database::open(&config.database_path)?);
        Ok(Self::new(config, jar, tabs, prefs))
    }

    pub fn new(
        config: Config,
        jar: Arc<dyn CookieJar>,
        tabs: Arc<dyn TabDirectory>,
        prefs: PrefsStore,
    ) -> Self {
        let observer = CookieObserver::new(config.cookie_domain.as_str(), config.cookie_name.as_str());
        let decoder = TokenDecoder::new(config.session_secret.as_bytes());
        let dispatcher = BroadcastDispatcher::new(tabs);

        Self {
            config,
            jar,
            observer,
            decoder,
            dispatcher,
            prefs,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn jar(&self) -> &Arc<dyn CookieJar> {
        &self.jar
    }

    pub fn observer(&self) -> &CookieObserver {
        &self.observer
    }

    pub fn decoder(&self) -> &TokenDecoder {
        &self.decoder
    }

    pub fn dispatcher(&self) -> &BroadcastDispatcher {
        &self.dispatcher
    }

    pub fn prefs(&self) -> &PrefsStore {
        &self.prefs
    }

    /// Read the auth cookie and decode it on demand.
    pub async fn current_token(&self) -> Option<String> {
        let value = self
            .jar
            .get(&self.config.cookie_domain, &self.config.cookie_name)
            .await;
        self.decoder.decode(value.as_deref())
    }
}
