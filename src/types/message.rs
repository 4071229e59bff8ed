use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bookmark::Bookmark;

/// Identity of a single browser tab, generated once per tab.
///
/// Used only so a tab can recognize and discard its own broadcast echoes.
/// Never persisted and never an ownership or auth identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(String);

impl TabId {
    /// Generates a fresh collision-resistant tab identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Targeted cross-tab signal about a single bookmark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TabSignal {
    BookmarkAdded { bookmark: Bookmark },
    BookmarkRemoved { id: String },
}

/// Envelope for cross-tab messages.
///
/// Carries the sending tab's identity (self-echo suppression) and the acting
/// user's id (receivers discard messages for a different user).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabMessage {
    pub tab_id: TabId,
    pub user_id: String,
    pub signal: TabSignal,
}

impl TabMessage {
    /// Serializes to the JSON payload a real browser broadcast channel
    /// would carry.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses a message from its JSON payload.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
