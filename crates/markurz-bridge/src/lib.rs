//! Markurz Bridge
//!
//! The extension's three execution contexts (background, per-tab page,
//! popup) share no memory and talk only through asynchronous messages. This
//! crate defines the wire protocol, the transport seams each side codes
//! against, the broadcast dispatcher that fans token updates out to every
//! loaded tab, and the per-context token store.
//!
//! The transport seams keep the propagation logic portable: the in-process
//! hub here backs the composition root and the tests, and a real browser
//! messaging layer can slot in behind the same traits.

mod dispatcher;
mod error;
mod hub;
mod message;
mod store;
mod transport;

pub use dispatcher::BroadcastDispatcher;
pub use error::BridgeError;
pub use hub::LocalHub;
pub use message::{DomSnapshot, Message, Request, Response, TokenUpdate};
pub use store::TokenStore;
pub use transport::{MessageHandler, MessageSender, TabChannel, TabDirectory, TabId};

pub type Result<T> = std::result::Result<T, BridgeError>;
