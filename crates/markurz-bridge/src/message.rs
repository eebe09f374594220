//! Wire protocol
//!
//! The JSON shapes are shared with the content scripts and must stay stable:
//! requests carry a `"type"` discriminator, the token broadcast is a bare
//! `{"token": ...}` object, and a page's inbound stream is the union of the
//! two.

use serde::{Deserialize, Serialize};

/// A request sent to a specific context, answered with a [`Response`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Seed request from a freshly created context to the background.
    #[serde(rename = "GET_COOKIE")]
    GetCookie,

    /// Background -> focused tab, on a context-menu click.
    #[serde(rename = "OPEN_DRAWER", rename_all = "camelCase")]
    OpenDrawer {
        page_url: String,
        selection_text: String,
    },

    /// Background -> tab, diagnostic page snapshot.
    #[serde(rename = "GET_DOM")]
    GetDom,
}

/// Unsolicited broadcast from the background on every cookie change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUpdate {
    pub token: Option<String>,
}

/// Page title plus all level-1 heading texts, answering `GET_DOM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomSnapshot {
    pub title: String,
    pub headlines: Vec<String>,
}

/// Anything that can arrive on a context's inbound channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Request(Request),
    Token(TokenUpdate),
}

/// Reply to a [`Request`]. `Ack` is the empty reply for fire-and-forget
/// style messages.
///
/// Untagged, so variant order is load-bearing: `Dom` must come before
/// `Cookie`, whose only field is optional and would otherwise swallow any
/// response object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Dom(DomSnapshot),
    Cookie { token: Option<String> },
    Ack,
}
