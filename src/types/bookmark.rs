use serde::{Deserialize, Serialize};

/// A saved bookmark, in the row shape persisted by the remote data store.
///
/// `id` is server-assigned and globally unique, except during the window
/// between an optimistic local add and the server round-trip completing,
/// where it holds a provisional locally-generated token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bookmark {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub created_at: i64,
}

/// Input for a bookmark that has not been written to the remote store yet.
/// Title and url are already trimmed and normalized once a draft exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub user_id: String,
    pub title: String,
    pub url: String,
}
