//! Fab/drawer state machine
//!
//! Guarded transitions:
//!
//! ```text
//! Idle
//!   | selection made        -> FabShown (if showFab pref allows)
//!   | selection cleared     -> Idle
//! FabShown
//!   | fab clicked           -> DrawerOpen
//!   | selection cleared     -> Idle
//! DrawerOpen
//!   | selection events      -> ignored (guard)
//!   | drawer closed         -> Idle
//! ```
//!
//! Invariant: the drawer and the fab are never visible together.

use crate::selection::{AnchorPoint, ScrollOffset, Selection};

pub struct OverlayController {
    highlighted_text: String,
    drawer_open: bool,
    fab_visible: bool,
    fab_anchor: Option<AnchorPoint>,
    show_fab: bool,
    signed_in: bool,
    /// Set when the user left the drawer to sign in; a token arrival then
    /// reopens the drawer.
    pending_open: bool,
}

impl OverlayController {
    pub fn new(show_fab: bool) -> Self {
        Self {
            highlighted_text: String::new(),
            drawer_open: false,
            fab_visible: false,
            fab_anchor: None,
            show_fab,
            signed_in: false,
            pending_open: false,
        }
    }

    /// A selection was made or adjusted. Ignored while the drawer is open so
    /// the fab cannot reappear behind it.
    pub fn on_selection(&mut self, selection: &Selection, scroll: ScrollOffset) {
        if self.drawer_open || selection.is_blank() {
            return;
        }

        self.highlighted_text = selection.text.clone();
        self.fab_anchor = Some(selection.anchor(scroll));
        self.fab_visible = self.show_fab;
        self.check_invariant();
    }

    /// The selection collapsed. Same guard as [`Self::on_selection`].
    pub fn on_selection_cleared(&mut self) {
        if self.drawer_open {
            return;
        }

        self.fab_visible = false;
        self.fab_anchor = None;
        self.highlighted_text.clear();
    }

    /// Context-menu handoff: open the drawer with the relayed selection, or
    /// the document title when the click carried no selection.
    pub fn on_open_drawer(&mut self, selection_text: &str, document_title: &str) {
        self.highlighted_text = if selection_text.is_empty() {
            document_title.to_string()
        } else {
            selection_text.to_string()
        };
        self.open_drawer();
    }

    /// The user clicked the fab.
    pub fn open_drawer_from_fab(&mut self) {
        if !self.fab_visible {
            return;
        }
        self.open_drawer();
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
        self.fab_anchor = None;
        self.highlighted_text.clear();
    }

    /// The user left the drawer to sign in; remember to come back.
    pub fn begin_sign_in(&mut self) {
        if !self.drawer_open {
            return;
        }
        self.drawer_open = false;
        self.pending_open = true;
    }

    /// Token state changed in this context's store.
    pub fn on_token(&mut self, token: Option<&str>) {
        self.signed_in = token.is_some();

        if self.signed_in && self.pending_open {
            self.pending_open = false;
            self.open_drawer();
        }
    }

    /// The `showFab` preference changed. Turning it off hides the fab even
    /// while a selection is active.
    pub fn set_show_fab(&mut self, show_fab: bool) {
        self.show_fab = show_fab;

        if !show_fab {
            self.fab_visible = false;
        } else if self.fab_anchor.is_some() && !self.drawer_open {
            self.fab_visible = true;
        }
        self.check_invariant();
    }

    fn open_drawer(&mut self) {
        self.drawer_open = true;
        self.fab_visible = false;
        self.check_invariant();
    }

    fn check_invariant(&self) {
        debug_assert!(
            !(self.drawer_open && self.fab_visible),
            "drawer and fab visible together"
        );
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub fn fab_visible(&self) -> bool {
        self.fab_visible
    }

    pub fn fab_anchor(&self) -> Option<AnchorPoint> {
        self.fab_anchor
    }

    pub fn highlighted_text(&self) -> &str {
        &self.highlighted_text
    }

    pub fn signed_in(&self) -> bool {
        self.signed_in
    }
}
