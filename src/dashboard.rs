//! Dashboard view core for Smartmarks.
//!
//! Wires the session guard, local store, remote sync channel, cross-tab
//! channel, and mutation operations into one view-scoped struct. All store
//! mutations happen as discrete steps on the caller's event loop: callbacks
//! are drained explicitly via the `pump_*` methods, and network completions
//! reconcile against whatever the store is at completion time.

use std::sync::Arc;

use crate::managers::broadcaster::{BroadcastHub, TabChannel};
use crate::managers::bookmark_store::BookmarkStore;
use crate::managers::mutations::{self, PendingAdd, PendingDelete};
use crate::managers::search;
use crate::managers::session_guard::{self, Redirect, Resolution, SessionGuard, View};
use crate::managers::sync_channel::SyncChannel;
use crate::remote::identity::IdentityProvider;
use crate::remote::data_store::RemoteStore;
use crate::types::bookmark::Bookmark;
use crate::types::errors::{AuthError, MutationError};
use crate::types::message::{TabId, TabSignal};
use crate::types::session::{AuthChange, Session};

use tokio::sync::broadcast;

/// Why the dashboard view must be torn down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardExit {
    /// Session is gone; redirect to the landing page.
    ToLanding,
    /// A different user signed in; drop this view and mount a fresh one so
    /// no subscription keeps delivering events for the stale user.
    Remount(Session),
}

/// The dashboard view: one per tab, created on successful session
/// resolution and discarded on sign-out or user change.
pub struct Dashboard<I: IdentityProvider, R: RemoteStore> {
    identity: Arc<I>,
    remote: Arc<R>,
    session: Session,
    store: BookmarkStore,
    feed: SyncChannel,
    tab: TabChannel,
    auth_changes: broadcast::Receiver<AuthChange>,
    title_input: String,
    url_input: String,
    adding: bool,
}

impl<I: IdentityProvider, R: RemoteStore> Dashboard<I, R> {
    /// Mounts the dashboard.
    ///
    /// Resolves the session first; `Ok(None)` means no session existed and
    /// the caller should redirect to the landing page without further work.
    /// A failed initial fetch is logged and leaves the store empty rather
    /// than failing the mount; the feed keeps it converging from there.
    pub async fn open(
        identity: Arc<I>,
        remote: Arc<R>,
        hub: &BroadcastHub,
    ) -> Result<Option<Self>, AuthError> {
        let guard = SessionGuard::new(identity.clone());
        let session = match guard.resolve_dashboard().await? {
            Resolution::Session(session) => session,
            Resolution::Redirect(_) => return Ok(None),
        };

        let mut store = BookmarkStore::new(&session.user_id);
        match remote.list_bookmarks(&session.user_id).await {
            Ok(rows) => store.load(rows),
            Err(e) => tracing::warn!(error = %e, "initial bookmark fetch failed, starting stale"),
        }

        let feed = SyncChannel::open(remote.as_ref(), &session.user_id);
        let tab = hub.join(TabId::generate());
        let auth_changes = identity.on_auth_change();
        tracing::debug!(user_id = %session.user_id, tab_id = %tab.tab_id().as_str(), "dashboard mounted");

        Ok(Some(Self {
            identity,
            remote,
            session,
            store,
            feed,
            tab,
            auth_changes,
            title_input: String::new(),
            url_input: String::new(),
            adding: false,
        }))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tab_id(&self) -> &TabId {
        self.tab.tab_id()
    }

    pub fn store(&self) -> &BookmarkStore {
        &self.store
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        self.store.entries()
    }

    /// Entries matching the query, newest first. Pure view over the store.
    pub fn visible(&self, query: &str) -> Vec<&Bookmark> {
        search::filter(self.store.entries(), query)
    }

    // --- form state ---

    pub fn set_title_input(&mut self, title: &str) {
        self.title_input = title.to_string();
    }

    pub fn set_url_input(&mut self, url: &str) {
        self.url_input = url.to_string();
    }

    pub fn title_input(&self) -> &str {
        &self.title_input
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    /// Whether a submit is in flight (the submit control is disabled).
    pub fn is_adding(&self) -> bool {
        self.adding
    }

    /// Submits the add form.
    ///
    /// Optimistically prepends a provisional entry, issues the remote
    /// create, then swaps in the server row on success or rolls the entry
    /// back out on failure. Sibling tabs are notified on success. The input
    /// fields clear after a completed attempt, success or failure; a
    /// validation rejection happens before the attempt and preserves them.
    pub async fn submit_add(&mut self) -> Result<Bookmark, MutationError> {
        if self.adding {
            return Err(MutationError::SubmitInFlight);
        }
        let draft = mutations::prepare_draft(&self.session.user_id, &self.title_input, &self.url_input)?;

        self.adding = true;
        let pending = PendingAdd::apply(&mut self.store, &draft);
        let result = self.remote.insert_bookmark(&draft).await;

        let outcome = match result {
            Ok(row) => {
                pending.commit(&mut self.store, row.clone());
                self.tab.send(
                    &self.session.user_id,
                    TabSignal::BookmarkAdded { bookmark: row.clone() },
                );
                Ok(row)
            }
            Err(e) => {
                tracing::warn!(error = %e, "bookmark insert failed, rolling back");
                pending.rollback(&mut self.store);
                Err(MutationError::Remote(e))
            }
        };

        self.title_input.clear();
        self.url_input.clear();
        self.adding = false;
        outcome
    }

    /// Deletes a bookmark by id.
    ///
    /// Optimistically removes the entry, issues the remote delete, restores
    /// the prior snapshot in full on failure, and notifies sibling tabs on
    /// success. The later feed delete for the same id is a safe no-op.
    pub async fn delete_bookmark(&mut self, id: &str) -> Result<(), MutationError> {
        let pending = PendingDelete::apply(&mut self.store, id);
        match self.remote.delete_bookmark(id).await {
            Ok(()) => {
                self.tab.send(
                    &self.session.user_id,
                    TabSignal::BookmarkRemoved { id: id.to_string() },
                );
                pending.commit();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, id, "bookmark delete failed, restoring snapshot");
                pending.rollback(&mut self.store);
                Err(MutationError::Remote(e))
            }
        }
    }

    // --- callback draining ---

    /// Merges remote feed events that have arrived since the last pump.
    /// Returns how many changed the store.
    pub fn pump_feed(&mut self) -> usize {
        self.feed.pump(&mut self.store)
    }

    /// Applies cross-tab signals that have arrived since the last pump.
    /// Self-echoes and other users' messages were already discarded by the
    /// channel. Returns how many changed the store.
    pub fn pump_broadcasts(&mut self) -> usize {
        let mut applied = 0;
        for signal in self.tab.drain(&self.session.user_id) {
            let changed = match signal {
                TabSignal::BookmarkAdded { bookmark } => self.store.insert_front(bookmark),
                TabSignal::BookmarkRemoved { id } => self.store.remove(&id).is_some(),
            };
            if changed {
                applied += 1;
            }
        }
        applied
    }

    /// Folds pending session-change notifications into the view.
    ///
    /// Returns `Some` when the view must be torn down: the session went away
    /// (redirect) or a different user signed in (remount).
    pub fn pump_auth(&mut self) -> Option<DashboardExit> {
        let mut current = Some(self.session.clone());
        loop {
            let change = match self.auth_changes.try_recv() {
                Ok(change) => change,
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            };
            if let Some(Redirect::ToLanding) =
                session_guard::apply_change(View::Dashboard, &mut current, change)
            {
                return Some(DashboardExit::ToLanding);
            }
        }
        match current {
            Some(session) if session.user_id != self.session.user_id => {
                Some(DashboardExit::Remount(session))
            }
            Some(session) => {
                self.session = session;
                None
            }
            // apply_change only clears the session alongside a redirect.
            None => Some(DashboardExit::ToLanding),
        }
    }

    /// Signs out and tears the view down. The session-change notification
    /// also reaches sibling tabs through their own guards.
    pub async fn sign_out(self) -> Result<Redirect, AuthError> {
        self.identity.sign_out().await?;
        self.tab.close();
        Ok(Redirect::ToLanding)
    }
}
