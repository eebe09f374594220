//! Context-menu relay
//!
//! The one path that can open the drawer without an in-page selection. The
//! click is relayed to the single active, focused, fully-loaded tab; when no
//! tab qualifies the click silently no-ops.

use serde::{Deserialize, Serialize};

use markurz_core::{Message, Request, TabDirectory};

pub const MENU_ID: &str = "mark-with-markurz";
pub const MENU_TITLE: &str = "Mark with Markurz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuContext {
    Selection,
    Page,
}

/// Registration data handed to the platform at install time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub contexts: Vec<MenuContext>,
}

pub fn registration() -> MenuItem {
    MenuItem {
        id: MENU_ID.to_string(),
        title: MENU_TITLE.to_string(),
        contexts: vec![MenuContext::Selection, MenuContext::Page],
    }
}

/// A click event as reported by the platform.
#[derive(Debug, Clone)]
pub struct MenuClick {
    pub page_url: String,
    pub selection_text: String,
}

pub async fn handle_click(tabs: &dyn TabDirectory, click: MenuClick) {
    let Some(tab) = tabs.focused_tab().await else {
        tracing::debug!("Menu click with no focused tab");
        return;
    };

    let message = Message::Request(Request::OpenDrawer {
        page_url: click.page_url,
        selection_text: click.selection_text,
    });

    if let Err(e) = tab.send(message).await {
        tracing::warn!(tab = %tab.id(), error = %e, "Drawer relay failed");
    }
}
