//! Identity provider seam for Smartmarks.
//!
//! Session issuance itself is external; the core only resolves the current
//! session, reacts to session-change notifications, and initiates
//! sign-in/sign-out flows.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::types::errors::AuthError;
use crate::types::session::{AuthChange, Session};

/// Trait defining the external identity provider interface.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves the current session, if any.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Subscribes to asynchronous session-change notifications.
    ///
    /// The receiver only sees changes that occur after this call.
    fn on_auth_change(&self) -> broadcast::Receiver<AuthChange>;

    /// Initiates an external sign-in flow with the named provider.
    /// `redirect_to` is where the flow lands after completion.
    async fn sign_in(&self, provider: &str, redirect_to: &str) -> Result<(), AuthError>;

    /// Invalidates the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}
