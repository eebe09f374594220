//! Bridge error types

use thiserror::Error;

use crate::transport::TabId;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Tab {0} is gone")]
    TabClosed(TabId),

    #[error("No listener in tab {0}")]
    NoListener(TabId),

    #[error("Background responder unavailable")]
    BackgroundUnavailable,
}
