//! Markurz Session Layer
//!
//! The background context owns the session token as the single source of
//! truth. It is derived from a signed authentication cookie shared with the
//! companion web app: the cookie observer filters raw change records down to
//! session events, and the token decoder verifies the cookie's signature and
//! extracts the embedded bearer token.

mod cookie;
mod error;
mod token;

pub use cookie::{
    ChangeCause, CookieChange, CookieEvent, CookieJar, CookieObserver, CookieRecord,
    MemoryCookieJar,
};
pub use error::SessionError;
pub use token::{sign_session_cookie, TokenDecoder};

pub type Result<T> = std::result::Result<T, SessionError>;
