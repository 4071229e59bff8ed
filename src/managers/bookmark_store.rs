//! Client-side bookmark store for Smartmarks.
//!
//! The in-memory ordered collection rendered by the UI, and the single place
//! where the no-duplicate-ids and single-owner invariants are enforced.
//! Three independently-arriving update sources (optimistic mutations, the
//! remote change feed, cross-tab signals) all funnel through these methods.

use crate::remote::data_store::ChangeEvent;
use crate::types::bookmark::Bookmark;

/// Immutable copy of a store's contents, taken before an optimistic delete
/// so a failed remote write can restore the exact prior state.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    entries: Vec<Bookmark>,
}

impl StoreSnapshot {
    pub fn entries(&self) -> &[Bookmark] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered bookmark collection for the currently-authenticated user.
///
/// Ordering is newest first: established by sorting on `created_at` at
/// initial load, then maintained incrementally by prepending new entries
/// rather than re-sorting.
#[derive(Debug)]
pub struct BookmarkStore {
    user_id: String,
    entries: Vec<Bookmark>,
}

impl BookmarkStore {
    /// Creates an empty store owned by the given user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            entries: Vec::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn entries(&self) -> &[Bookmark] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.position(id).map(|idx| &self.entries[idx])
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|b| b.id == id)
    }

    /// Replaces the contents with the initial fetch result.
    ///
    /// Rows for other users are discarded; the rest are sorted newest first.
    /// This is the only operation that sorts.
    pub fn load(&mut self, rows: Vec<Bookmark>) {
        self.entries = rows;
        self.entries.retain(|b| b.user_id == self.user_id);
        self.entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.entries.dedup_by(|a, b| a.id == b.id);
    }

    /// Prepends a bookmark, deduplicating by id.
    ///
    /// Returns `false` without modifying the store when an entry with the
    /// same id already exists or the bookmark belongs to a different user.
    pub fn insert_front(&mut self, bookmark: Bookmark) -> bool {
        if bookmark.user_id != self.user_id || self.contains(&bookmark.id) {
            return false;
        }
        self.entries.insert(0, bookmark);
        true
    }

    /// Removes the entry with the given id. Removing an absent id is a
    /// silent no-op, not an error.
    pub fn remove(&mut self, id: &str) -> Option<Bookmark> {
        let idx = self.position(id)?;
        Some(self.entries.remove(idx))
    }

    /// Swaps a provisional entry for the server-confirmed row, in place.
    ///
    /// If the confirmed id is already present (the feed insert for this
    /// tab's own add won the race), the provisional entry is dropped
    /// instead of duplicating. If the provisional entry is gone, the
    /// confirmed row is prepended, subject to the usual dedup.
    pub fn confirm(&mut self, provisional_id: &str, confirmed: Bookmark) {
        if confirmed.user_id != self.user_id {
            self.remove(provisional_id);
            return;
        }
        if self.contains(&confirmed.id) {
            self.remove(provisional_id);
            return;
        }
        match self.position(provisional_id) {
            Some(idx) => self.entries[idx] = confirmed,
            None => {
                self.insert_front(confirmed);
            }
        }
    }

    /// Merges a remote feed event.
    ///
    /// Inserts deduplicate by id; deletes of absent ids are no-ops. Returns
    /// whether the store changed.
    pub fn apply(&mut self, event: &ChangeEvent) -> bool {
        match event {
            ChangeEvent::Inserted(row) => self.insert_front(row.clone()),
            ChangeEvent::Deleted(row) => self.remove(&row.id).is_some(),
        }
    }

    /// Takes an immutable full copy of the current contents.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            entries: self.entries.clone(),
        }
    }

    /// Restores the store to a previously-taken snapshot.
    pub fn restore(&mut self, snapshot: StoreSnapshot) {
        self.entries = snapshot.entries;
    }
}
