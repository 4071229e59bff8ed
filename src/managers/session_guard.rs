//! Session guard for Smartmarks.
//!
//! Resolves whether a valid session exists before a view does any work, and
//! folds asynchronous session-change notifications into the current
//! identity. Redirect decisions are idempotent in both directions: a
//! resolved session never bounces off the dashboard, and the landing page
//! forwards straight to the dashboard when a session already exists.

use std::sync::Arc;

use crate::remote::identity::IdentityProvider;
use crate::types::errors::AuthError;
use crate::types::session::{AuthChange, Session};

/// Where the router should send the user next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    ToLanding,
    ToDashboard,
}

/// Which view a session-change notification is being applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Dashboard,
}

/// Outcome of resolving the session for the dashboard view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A session exists; proceed with this identity.
    Session(Session),
    /// No session; redirect and perform no further work.
    Redirect(Redirect),
}

/// Guard that resolves the session on view mount.
pub struct SessionGuard<I: IdentityProvider> {
    identity: Arc<I>,
}

impl<I: IdentityProvider> SessionGuard<I> {
    pub fn new(identity: Arc<I>) -> Self {
        Self { identity }
    }

    /// Resolves the session for the dashboard. Unauthenticated visitors are
    /// sent to the landing page.
    pub async fn resolve_dashboard(&self) -> Result<Resolution, AuthError> {
        match self.identity.current_session().await? {
            Some(session) => Ok(Resolution::Session(session)),
            None => Ok(Resolution::Redirect(Redirect::ToLanding)),
        }
    }

    /// Resolves the session for the landing page. Returns a forward redirect
    /// when a session already exists, `None` to stay put.
    pub async fn resolve_landing(&self) -> Result<Option<Redirect>, AuthError> {
        Ok(self
            .identity
            .current_session()
            .await?
            .map(|_| Redirect::ToDashboard))
    }
}

/// Folds one session-change notification into the current identity.
///
/// Returns at most one redirect per actual state transition; repeated
/// delivery of the same state produces no redirect.
pub fn apply_change(
    view: View,
    current: &mut Option<Session>,
    change: AuthChange,
) -> Option<Redirect> {
    match (view, change) {
        (View::Dashboard, AuthChange::SignedOut) => {
            let had_session = current.take().is_some();
            had_session.then_some(Redirect::ToLanding)
        }
        (View::Dashboard, AuthChange::SignedIn(session)) => {
            // Identity update only; the dashboard is already the right place.
            *current = Some(session);
            None
        }
        (View::Landing, AuthChange::SignedOut) => {
            *current = None;
            None
        }
        (View::Landing, AuthChange::SignedIn(session)) => {
            let was_signed_out = current.is_none();
            *current = Some(session);
            was_signed_out.then_some(Redirect::ToDashboard)
        }
    }
}
