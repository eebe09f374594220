//! Markurz Extension Runtime
//!
//! Composition root for the background context: cookie observation feeding
//! the broadcast dispatcher, the message responder, the context-menu relay,
//! and the popup surface. The binary in `main.rs` wires everything over the
//! in-process hub and scripts a full session.

pub mod handlers;
mod popup;
mod state;
mod submit;

pub use popup::Popup;
pub use state::BackgroundState;
pub use submit::{submit_task, SubmitOutcome};
