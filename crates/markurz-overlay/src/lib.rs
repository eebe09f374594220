//! Markurz Overlay
//!
//! Everything the content script owns inside one page: the highlighted
//! selection, the floating action button that follows it, the side drawer,
//! and the dispatch loop that reacts to background messages. At most one of
//! {drawer open, fab shown} is ever true.

mod controller;
mod dom;
mod page;
mod selection;

pub use controller::OverlayController;
pub use dom::snapshot;
pub use page::PageContext;
pub use selection::{AnchorPoint, ScrollOffset, Selection, SelectionRect};
