//! Optimistic mutation operations for Smartmarks.
//!
//! Add and delete are two-phase: apply the tentative local change first,
//! then commit the server result or roll back. The rollback state is
//! captured up front and never mutated, so a failure restores the exact
//! pre-mutation contents regardless of what ran in between.

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::types::bookmark::{Bookmark, BookmarkDraft};
use crate::types::errors::MutationError;

use super::bookmark_store::{BookmarkStore, StoreSnapshot};

/// Returns the current UNIX timestamp in seconds.
fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Normalizes a raw url: trims whitespace and prepends `https://` when no
/// `http://`/`https://` scheme prefix is present (case-insensitive check).
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Validates and normalizes form input into a draft, ahead of any network
/// call. Empty title or url after trimming is rejected here.
pub fn prepare_draft(user_id: &str, title: &str, url: &str) -> Result<BookmarkDraft, MutationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(MutationError::EmptyTitle);
    }
    if url.trim().is_empty() {
        return Err(MutationError::EmptyUrl);
    }
    Ok(BookmarkDraft {
        user_id: user_id.to_string(),
        title: title.to_string(),
        url: normalize_url(url),
    })
}

/// An optimistic add in flight: the provisional entry is in the store,
/// awaiting the remote write's outcome.
#[derive(Debug)]
pub struct PendingAdd {
    provisional_id: String,
}

impl PendingAdd {
    /// Phase one: prepends a provisional bookmark with a locally-generated
    /// placeholder id and the current timestamp.
    pub fn apply(store: &mut BookmarkStore, draft: &BookmarkDraft) -> Self {
        let provisional = Bookmark {
            id: Uuid::new_v4().to_string(),
            user_id: draft.user_id.clone(),
            title: draft.title.clone(),
            url: draft.url.clone(),
            created_at: now(),
        };
        let provisional_id = provisional.id.clone();
        store.insert_front(provisional);
        Self { provisional_id }
    }

    pub fn provisional_id(&self) -> &str {
        &self.provisional_id
    }

    /// Phase two, success: swaps the provisional entry for the server row
    /// at the same position. Same id-lookup-and-swap discipline as feed
    /// deduplication, so a feed insert that arrived first is harmless.
    pub fn commit(self, store: &mut BookmarkStore, confirmed: Bookmark) {
        store.confirm(&self.provisional_id, confirmed);
    }

    /// Phase two, failure: takes the provisional entry back out.
    pub fn rollback(self, store: &mut BookmarkStore) {
        store.remove(&self.provisional_id);
    }
}

/// An optimistic delete in flight, holding the pre-delete snapshot.
#[derive(Debug)]
pub struct PendingDelete {
    snapshot: StoreSnapshot,
    id: String,
}

impl PendingDelete {
    /// Phase one: snapshots the store, then removes the entry.
    pub fn apply(store: &mut BookmarkStore, id: &str) -> Self {
        let snapshot = store.snapshot();
        store.remove(id);
        Self {
            snapshot,
            id: id.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Phase two, success: the entry stays gone.
    pub fn commit(self) {}

    /// Phase two, failure: restores the prior snapshot in full.
    pub fn rollback(self, store: &mut BookmarkStore) {
        store.restore(self.snapshot);
    }
}
