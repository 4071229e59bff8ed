//! Unit tests for the client-side BookmarkStore.
//!
//! Exercises the ordering, deduplication, and snapshot/restore behavior that
//! the three update sources (mutations, remote feed, cross-tab signals) all
//! rely on.

use smartmarks::managers::bookmark_store::BookmarkStore;
use smartmarks::remote::data_store::ChangeEvent;
use smartmarks::types::bookmark::Bookmark;

const USER: &str = "user-1";

fn bookmark(id: &str, title: &str, created_at: i64) -> Bookmark {
    Bookmark {
        id: id.to_string(),
        user_id: USER.to_string(),
        title: title.to_string(),
        url: format!("https://{}.example", id),
        created_at,
    }
}

/// Initial load sorts newest first regardless of input order.
#[test]
fn test_load_orders_newest_first() {
    let mut store = BookmarkStore::new(USER);
    store.load(vec![
        bookmark("a", "Oldest", 100),
        bookmark("b", "Newest", 300),
        bookmark("c", "Middle", 200),
    ]);

    let ids: Vec<&str> = store.entries().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["b", "c", "a"]);
}

/// Load discards rows that belong to a different user.
#[test]
fn test_load_discards_foreign_rows() {
    let mut store = BookmarkStore::new(USER);
    let mut foreign = bookmark("x", "Not mine", 500);
    foreign.user_id = "user-2".to_string();
    store.load(vec![bookmark("a", "Mine", 100), foreign]);

    assert_eq!(store.len(), 1);
    assert!(store.contains("a"));
    assert!(!store.contains("x"));
}

/// Insert prepends and preserves the prior order of remaining entries.
#[test]
fn test_insert_front_prepends() {
    let mut store = BookmarkStore::new(USER);
    store.load(vec![bookmark("a", "A", 100), bookmark("b", "B", 200)]);

    assert!(store.insert_front(bookmark("c", "C", 300)));

    let ids: Vec<&str> = store.entries().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["c", "b", "a"]);
}

/// Inserting an id that already exists is a no-op, not a duplicate.
#[test]
fn test_insert_front_dedups_by_id() {
    let mut store = BookmarkStore::new(USER);
    assert!(store.insert_front(bookmark("a", "First", 100)));
    assert!(!store.insert_front(bookmark("a", "Echo", 200)));

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("a").unwrap().title, "First");
}

/// Inserting a bookmark owned by a different user is rejected.
#[test]
fn test_insert_front_rejects_foreign_owner() {
    let mut store = BookmarkStore::new(USER);
    let mut foreign = bookmark("a", "A", 100);
    foreign.user_id = "user-2".to_string();

    assert!(!store.insert_front(foreign));
    assert!(store.is_empty());
}

/// Removing an existing id removes exactly that entry; removing an absent
/// id is a silent no-op.
#[test]
fn test_remove_exact_and_absent() {
    let mut store = BookmarkStore::new(USER);
    store.load(vec![bookmark("a", "A", 100), bookmark("b", "B", 200)]);

    let removed = store.remove("a").unwrap();
    assert_eq!(removed.id, "a");
    assert_eq!(store.len(), 1);
    assert!(store.contains("b"));

    assert!(store.remove("nope").is_none());
    assert_eq!(store.len(), 1);
}

/// Confirm swaps the provisional entry for the server row at the same
/// position.
#[test]
fn test_confirm_swaps_in_place() {
    let mut store = BookmarkStore::new(USER);
    store.load(vec![bookmark("old", "Old", 100)]);
    store.insert_front(bookmark("tmp", "Pending", 200));

    store.confirm("tmp", bookmark("real", "Pending", 200));

    let ids: Vec<&str> = store.entries().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["real", "old"]);
}

/// When the feed insert for the same row won the race, confirm drops the
/// provisional entry instead of duplicating.
#[test]
fn test_confirm_after_feed_insert_does_not_duplicate() {
    let mut store = BookmarkStore::new(USER);
    store.insert_front(bookmark("tmp", "Pending", 200));
    // Feed event for this tab's own add arrives before the write resolves.
    assert!(store.apply(&ChangeEvent::Inserted(bookmark("real", "Pending", 200))));

    store.confirm("tmp", bookmark("real", "Pending", 200));

    assert_eq!(store.len(), 1);
    assert!(store.contains("real"));
    assert!(!store.contains("tmp"));
}

/// Feed insert of an id already present is discarded as a no-op.
#[test]
fn test_apply_insert_dedups() {
    let mut store = BookmarkStore::new(USER);
    store.load(vec![bookmark("a", "A", 100)]);

    assert!(!store.apply(&ChangeEvent::Inserted(bookmark("a", "A", 100))));
    assert_eq!(store.len(), 1);
}

/// Feed delete of an id already absent leaves the store unchanged.
#[test]
fn test_apply_delete_absent_is_idempotent() {
    let mut store = BookmarkStore::new(USER);
    store.load(vec![bookmark("a", "A", 100)]);

    assert!(store.apply(&ChangeEvent::Deleted(bookmark("a", "A", 100))));
    assert!(!store.apply(&ChangeEvent::Deleted(bookmark("a", "A", 100))));
    assert!(store.is_empty());
}

/// Restore returns the store to exactly the snapshotted contents even after
/// intervening mutations.
#[test]
fn test_snapshot_restore_round_trip() {
    let mut store = BookmarkStore::new(USER);
    store.load(vec![bookmark("a", "A", 100), bookmark("b", "B", 200)]);

    let snapshot = store.snapshot();
    store.remove("a");
    store.insert_front(bookmark("c", "C", 300));
    assert_ne!(store.len(), snapshot.len());

    store.restore(snapshot);
    let ids: Vec<&str> = store.entries().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
}
