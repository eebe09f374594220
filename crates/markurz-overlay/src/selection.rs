//! Highlighted selection model

use serde::{Deserialize, Serialize};

/// Viewport-relative bounding rectangle of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Current page scroll offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// Document coordinates where the fab is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
}

/// A freshly made text selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub text: String,
    pub rect: SelectionRect,
}

impl Selection {
    pub fn new(text: impl Into<String>, rect: SelectionRect) -> Self {
        Self {
            text: text.into(),
            rect,
        }
    }

    /// Whitespace-only selections never activate the fab.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The fab sits at the selection's top-right corner, translated into
    /// document coordinates.
    pub fn anchor(&self, scroll: ScrollOffset) -> AnchorPoint {
        AnchorPoint {
            x: self.rect.x + self.rect.width + scroll.x,
            y: self.rect.y + scroll.y,
        }
    }
}
