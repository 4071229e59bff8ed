//! Search filter for Smartmarks.
//!
//! A pure, derived view over the store: no state of its own, recomputed
//! whenever the store or the query changes.

use crate::types::bookmark::Bookmark;

/// Whether a bookmark matches the query as a case-insensitive substring of
/// its title or url.
pub fn matches(bookmark: &Bookmark, query: &str) -> bool {
    let query = query.to_lowercase();
    bookmark.title.to_lowercase().contains(&query)
        || bookmark.url.to_lowercase().contains(&query)
}

/// Filters entries by the query, preserving order. An empty query returns
/// every entry unchanged.
pub fn filter<'a>(entries: &'a [Bookmark], query: &str) -> Vec<&'a Bookmark> {
    if query.is_empty() {
        return entries.iter().collect();
    }
    entries.iter().filter(|b| matches(b, query)).collect()
}
