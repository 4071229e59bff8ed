//! In-memory implementations of the external collaborators.
//!
//! These play the role a managed backend plays in production: row storage
//! with a live change feed, and an identity provider with session-change
//! notifications. The demo binary and the test suite run against them.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::types::bookmark::{Bookmark, BookmarkDraft};
use crate::types::errors::{AuthError, RemoteError};
use crate::types::session::{AuthChange, Session};

use super::data_store::{ChangeEvent, FeedSubscription, RemoteStore};
use super::identity::IdentityProvider;

const FEED_CAPACITY: usize = 256;
const AUTH_CAPACITY: usize = 16;

/// In-memory remote data store with a broadcast change feed.
///
/// `created_at` assignment is strictly monotonic so default ordering is
/// total even for rows created within the same second. Write failures can be
/// injected with [`MemoryRemoteStore::set_fail_writes`] to exercise rollback
/// paths.
pub struct MemoryRemoteStore {
    rows: Mutex<Vec<Bookmark>>,
    feed: broadcast::Sender<ChangeEvent>,
    fail_writes: AtomicBool,
    last_created_at: AtomicI64,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            rows: Mutex::new(Vec::new()),
            feed,
            fail_writes: AtomicBool::new(false),
            last_created_at: AtomicI64::new(0),
        }
    }

    /// When set, insert and delete calls fail with a network error until
    /// cleared again.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of rows currently stored, across all users.
    pub fn row_count(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    /// Inserts a row as if another client of the same user had created it,
    /// emitting the corresponding feed event.
    pub fn insert_from_other_client(&self, draft: &BookmarkDraft) -> Bookmark {
        let row = self.make_row(draft);
        if let Ok(mut rows) = self.rows.lock() {
            rows.push(row.clone());
        }
        let _ = self.feed.send(ChangeEvent::Inserted(row.clone()));
        row
    }

    /// Deletes a row as if another client had deleted it, emitting the
    /// corresponding feed event if the row existed.
    pub fn delete_from_other_client(&self, id: &str) {
        if let Some(row) = self.take_row(id) {
            let _ = self.feed.send(ChangeEvent::Deleted(row));
        }
    }

    fn make_row(&self, draft: &BookmarkDraft) -> Bookmark {
        Bookmark {
            id: Uuid::new_v4().to_string(),
            user_id: draft.user_id.clone(),
            title: draft.title.clone(),
            url: draft.url.clone(),
            created_at: self.next_created_at(),
        }
    }

    /// Current UNIX timestamp, bumped past the previous assignment so rows
    /// never share a `created_at`.
    fn next_created_at(&self) -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        let mut prev = self.last_created_at.load(Ordering::SeqCst);
        loop {
            let next = now.max(prev + 1);
            match self.last_created_at.compare_exchange(
                prev,
                next,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }

    fn take_row(&self, id: &str) -> Option<Bookmark> {
        let mut rows = self.rows.lock().ok()?;
        let idx = rows.iter().position(|row| row.id == id)?;
        Some(rows.remove(idx))
    }

    fn check_writes(&self) -> Result<(), RemoteError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(RemoteError::Network("remote store unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Default for MemoryRemoteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteStore for MemoryRemoteStore {
    async fn list_bookmarks(&self, user_id: &str) -> Result<Vec<Bookmark>, RemoteError> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| RemoteError::Rejected(e.to_string()))?;
        let mut owned: Vec<Bookmark> = rows
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn insert_bookmark(&self, draft: &BookmarkDraft) -> Result<Bookmark, RemoteError> {
        self.check_writes()?;
        let row = self.make_row(draft);
        {
            let mut rows = self
                .rows
                .lock()
                .map_err(|e| RemoteError::Rejected(e.to_string()))?;
            rows.push(row.clone());
        }
        let _ = self.feed.send(ChangeEvent::Inserted(row.clone()));
        Ok(row)
    }

    async fn delete_bookmark(&self, id: &str) -> Result<(), RemoteError> {
        self.check_writes()?;
        if let Some(row) = self.take_row(id) {
            let _ = self.feed.send(ChangeEvent::Deleted(row));
        }
        Ok(())
    }

    fn subscribe(&self, user_id: &str) -> FeedSubscription {
        FeedSubscription::new(user_id, self.feed.subscribe())
    }
}

/// In-memory identity provider.
///
/// Sign-in skips the external flow and mints a session directly; everything
/// downstream (session resolution, change notifications) behaves as the real
/// provider would.
pub struct MemoryIdentityProvider {
    session: Mutex<Option<Session>>,
    changes: broadcast::Sender<AuthChange>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(AUTH_CAPACITY);
        Self {
            session: Mutex::new(None),
            changes,
        }
    }

    /// Starts out already signed in as the given session.
    pub fn with_session(session: Session) -> Self {
        let provider = Self::new();
        if let Ok(mut current) = provider.session.lock() {
            *current = Some(session);
        }
        provider
    }

    /// Replaces the current session and notifies subscribers, simulating an
    /// external sign-in completing (or an expiry when `None`).
    pub fn set_session(&self, session: Option<Session>) {
        if let Ok(mut current) = self.session.lock() {
            *current = session.clone();
        }
        let change = match session {
            Some(s) => AuthChange::SignedIn(s),
            None => AuthChange::SignedOut,
        };
        let _ = self.changes.send(change);
    }
}

impl Default for MemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        self.session
            .lock()
            .map(|s| s.clone())
            .map_err(|e| AuthError::Provider(e.to_string()))
    }

    fn on_auth_change(&self) -> broadcast::Receiver<AuthChange> {
        self.changes.subscribe()
    }

    async fn sign_in(&self, provider: &str, _redirect_to: &str) -> Result<(), AuthError> {
        let session = Session {
            user_id: Uuid::new_v4().to_string(),
            email: Some(format!("user@{}.example", provider)),
        };
        self.set_session(Some(session));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.set_session(None);
        Ok(())
    }
}
