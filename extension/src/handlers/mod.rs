//! Background event handlers
//!
//! Each module reacts to one platform event source: cookie changes, inbound
//! runtime messages, and context-menu clicks.

pub mod cookies;
pub mod menu;
pub mod messages;
