//! Remote sync channel for Smartmarks.
//!
//! Holds the server-pushed change-feed subscription for the current user and
//! merges its events into the local store. This is the only path by which
//! bookmarks created or deleted by *other* sessions of the same user become
//! visible to this tab. Dropping the channel tears down the subscription, so
//! a stale user scope can never deliver events after teardown.

use crate::remote::data_store::{ChangeEvent, FeedSubscription, RemoteStore};

use super::bookmark_store::BookmarkStore;

/// Live remote change feed bound to one user.
pub struct SyncChannel {
    subscription: FeedSubscription,
}

impl SyncChannel {
    /// Opens the feed subscription scoped to rows owned by `user_id`.
    pub fn open<R: RemoteStore + ?Sized>(remote: &R, user_id: &str) -> Self {
        Self {
            subscription: remote.subscribe(user_id),
        }
    }

    pub fn user_id(&self) -> &str {
        self.subscription.user_id()
    }

    /// Waits for the next feed event. Returns `None` once the feed closes.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        self.subscription.next().await
    }

    /// Drains delivered feed events into the store.
    ///
    /// Inserts merge with id-based deduplication (an event for this tab's
    /// own resolved add is a no-op); deletes of absent ids are silent
    /// no-ops. Returns how many events actually changed the store.
    pub fn pump(&mut self, store: &mut BookmarkStore) -> usize {
        let mut applied = 0;
        for event in self.subscription.drain() {
            if store.apply(&event) {
                applied += 1;
            } else {
                tracing::debug!(id = %event.row().id, "feed event was a no-op");
            }
        }
        applied
    }
}
