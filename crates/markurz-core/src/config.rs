//! Extension configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// GraphQL endpoint of the task backend
    pub api_url: String,
    /// Companion web app, also the auth cookie's origin
    pub app_url: String,
    /// Domain the auth cookie is scoped to
    pub cookie_domain: String,
    /// Name of the auth cookie
    pub cookie_name: String,
    /// Secret shared with the companion app for cookie signatures
    pub session_secret: String,
    /// Path to the preference database
    pub database_path: PathBuf,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let session_secret = std::env::var("MARKURZ_SESSION_SECRET")
            .unwrap_or_else(|_| "development-secret".to_string());

        Self {
            api_url: "https://api.markurz.app/graphql".to_string(),
            app_url: "https://markurz.app".to_string(),
            cookie_domain: "markurz.app".to_string(),
            cookie_name: "next-auth.session-token".to_string(),
            session_secret,
            database_path: data_dir.join("markurz.db"),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Markurz"))
            .unwrap_or_else(|| PathBuf::from(".markurz"))
    }

    /// Where to send the user when the backend reports `UNAUTHENTICATED`.
    pub fn sign_in_url(&self) -> String {
        format!("{}/sign-in", self.app_url.trim_end_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_url() {
        let config = Config::new(PathBuf::from("/tmp"));
        assert_eq!(config.sign_in_url(), "https://markurz.app/sign-in");

        let mut trailing = config.clone();
        trailing.app_url = "https://markurz.app/".to_string();
        assert_eq!(trailing.sign_in_url(), "https://markurz.app/sign-in");
    }
}
