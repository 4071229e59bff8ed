//! Unit tests for the remote sync channel.
//!
//! The feed is driven through the in-memory remote store, which emits change
//! events exactly as a managed backend's change feed would.

use smartmarks::managers::bookmark_store::BookmarkStore;
use smartmarks::managers::sync_channel::SyncChannel;
use smartmarks::remote::data_store::RemoteStore;
use smartmarks::remote::memory::MemoryRemoteStore;
use smartmarks::types::bookmark::BookmarkDraft;

const USER: &str = "user-1";

fn draft(user_id: &str, title: &str) -> BookmarkDraft {
    BookmarkDraft {
        user_id: user_id.to_string(),
        title: title.to_string(),
        url: "https://example.com".to_string(),
    }
}

/// An insert by another client of the same user flows through the feed into
/// the store.
#[tokio::test]
async fn test_feed_insert_reaches_store() {
    let remote = MemoryRemoteStore::new();
    let mut channel = SyncChannel::open(&remote, USER);
    let mut store = BookmarkStore::new(USER);

    let row = remote.insert_from_other_client(&draft(USER, "Docs"));

    assert_eq!(channel.pump(&mut store), 1);
    assert!(store.contains(&row.id));
}

/// Events for other users' rows are never observed through the channel.
#[tokio::test]
async fn test_feed_is_scoped_to_user() {
    let remote = MemoryRemoteStore::new();
    let mut channel = SyncChannel::open(&remote, USER);
    let mut store = BookmarkStore::new(USER);

    remote.insert_from_other_client(&draft("user-2", "Not mine"));
    let mine = remote.insert_from_other_client(&draft(USER, "Mine"));

    assert_eq!(channel.pump(&mut store), 1);
    assert_eq!(store.len(), 1);
    assert!(store.contains(&mine.id));
}

/// A feed insert for a row this tab already holds (its own resolved add) is
/// discarded as a no-op.
#[tokio::test]
async fn test_feed_insert_dedups_own_add() {
    let remote = MemoryRemoteStore::new();
    let mut channel = SyncChannel::open(&remote, USER);
    let mut store = BookmarkStore::new(USER);

    // This tab's own write path already put the confirmed row in the store.
    let row = remote.insert_bookmark(&draft(USER, "Docs")).await.unwrap();
    store.insert_front(row.clone());

    assert_eq!(channel.pump(&mut store), 0);
    assert_eq!(store.len(), 1);
}

/// A feed delete for an id removed locally moments earlier leaves the store
/// unchanged.
#[tokio::test]
async fn test_feed_delete_absent_is_noop() {
    let remote = MemoryRemoteStore::new();
    let mut channel = SyncChannel::open(&remote, USER);
    let mut store = BookmarkStore::new(USER);

    let row = remote.insert_from_other_client(&draft(USER, "Docs"));
    channel.pump(&mut store);

    // Local optimistic delete wins the race against the feed event.
    store.remove(&row.id);
    remote.delete_from_other_client(&row.id);

    assert_eq!(channel.pump(&mut store), 0);
    assert!(store.is_empty());
}

/// A delete by another client removes the row from this tab's store.
#[tokio::test]
async fn test_feed_delete_reaches_store() {
    let remote = MemoryRemoteStore::new();
    let mut channel = SyncChannel::open(&remote, USER);
    let mut store = BookmarkStore::new(USER);

    let row = remote.insert_from_other_client(&draft(USER, "Docs"));
    channel.pump(&mut store);
    assert_eq!(store.len(), 1);

    remote.delete_from_other_client(&row.id);
    assert_eq!(channel.pump(&mut store), 1);
    assert!(store.is_empty());
}

/// Dropping the channel tears down the subscription; events emitted
/// afterwards go nowhere instead of piling up for a stale user.
#[tokio::test]
async fn test_drop_tears_down_subscription() {
    let remote = MemoryRemoteStore::new();
    let channel = SyncChannel::open(&remote, USER);
    drop(channel);

    // No subscriber panics or buffers; a fresh channel starts clean.
    remote.insert_from_other_client(&draft(USER, "After teardown"));
    let mut fresh = SyncChannel::open(&remote, USER);
    let mut store = BookmarkStore::new(USER);
    assert_eq!(fresh.pump(&mut store), 0);
}
