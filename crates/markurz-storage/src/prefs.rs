//! Typed preference access and change fan-out
//!
//! One `PrefsStore` handle is shared by every context. A successful write
//! emits a `PrefChange` on the broadcast channel, which stands in for the
//! platform's storage-change event: the popup writes, page contexts react.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::database::Database;
use crate::Result;

/// Preference key for the floating action button visibility.
pub const SHOW_FAB_KEY: &str = "showFab";

/// Emitted to all subscribers after a preference write. Serializes to the
/// platform's storage-change shape, `{"showFab":{"newValue":...}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefChange {
    #[serde(rename = "showFab", with = "new_value")]
    pub show_fab: bool,
}

mod new_value {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct NewValue {
        new_value: bool,
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        NewValue { new_value: *value }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(NewValue::deserialize(deserializer)?.new_value)
    }
}

pub struct PrefsStore {
    db: Database,
    changes: broadcast::Sender<PrefChange>,
}

impl PrefsStore {
    pub fn new(db: Database) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self { db, changes }
    }

    /// Whether the floating action button should be shown. Defaults to true
    /// until the popup has written an explicit preference.
    pub fn show_fab(&self) -> Result<bool> {
        match self.db.get_pref(SHOW_FAB_KEY)? {
            Some(value) => parse_bool(SHOW_FAB_KEY, &value),
            None => Ok(true),
        }
    }

    pub fn set_show_fab(&self, show_fab: bool) -> Result<()> {
        self.db.set_pref(SHOW_FAB_KEY, if show_fab { "true" } else { "false" })?;

        // Receiver-less send just means no context is listening yet.
        let _ = self.changes.send(PrefChange { show_fab });

        tracing::debug!(show_fab, "Preference updated");
        Ok(())
    }

    /// Subscribe to preference changes. Each context holds one receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<PrefChange> {
        self.changes.subscribe()
    }
}

impl Clone for PrefsStore {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            changes: self.changes.clone(),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(crate::StorageError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
