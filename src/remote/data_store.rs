//! Remote data store seam for Smartmarks.
//!
//! The managed backend (row storage, row-level security, change feed) is an
//! external collaborator. This module defines the trait the synchronization
//! core is written against, plus the per-user feed subscription handle.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::types::bookmark::{Bookmark, BookmarkDraft};
use crate::types::errors::RemoteError;

/// Server-pushed change event for a bookmark row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    Inserted(Bookmark),
    Deleted(Bookmark),
}

impl ChangeEvent {
    /// The row the event is about.
    pub fn row(&self) -> &Bookmark {
        match self {
            ChangeEvent::Inserted(row) => row,
            ChangeEvent::Deleted(row) => row,
        }
    }
}

/// Trait defining the remote data store interface.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches all bookmarks owned by `user_id`, ordered by creation
    /// timestamp descending (newest first).
    async fn list_bookmarks(&self, user_id: &str) -> Result<Vec<Bookmark>, RemoteError>;

    /// Inserts a bookmark and returns the created row with its server id.
    async fn insert_bookmark(&self, draft: &BookmarkDraft) -> Result<Bookmark, RemoteError>;

    /// Deletes a bookmark by id. Deleting an id that no longer exists
    /// succeeds, matching SQL delete-matching-zero-rows semantics.
    async fn delete_bookmark(&self, id: &str) -> Result<(), RemoteError>;

    /// Opens a change-feed subscription scoped to rows owned by `user_id`.
    /// The subscription is torn down when the handle is dropped.
    fn subscribe(&self, user_id: &str) -> FeedSubscription;
}

/// Live subscription to one user's bookmark change feed.
///
/// Events for other users are never observed through this handle. Dropping
/// the handle tears down the subscription, so no stale-user callbacks can
/// fire after view teardown or a user change.
pub struct FeedSubscription {
    user_id: String,
    rx: broadcast::Receiver<ChangeEvent>,
}

impl FeedSubscription {
    pub fn new(user_id: impl Into<String>, rx: broadcast::Receiver<ChangeEvent>) -> Self {
        Self {
            user_id: user_id.into(),
            rx,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Waits for the next event scoped to this subscription's user.
    /// Returns `None` once the feed is closed.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.row().user_id == self.user_id => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "feed subscription lagged, events dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Drains events that have already been delivered, without waiting.
    pub fn drain(&mut self) -> Vec<ChangeEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) if event.row().user_id == self.user_id => events.push(event),
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "feed subscription lagged, events dropped");
                    continue;
                }
                Err(_) => break,
            }
        }
        events
    }
}
