//! Cross-tab broadcaster for Smartmarks.
//!
//! One logical channel per deployment namespace, shared by every tab of the
//! same browser profile regardless of user. Receivers discard their own
//! echoes by tab identity and discard messages addressed to a different
//! user. The signal shape is targeted-entity throughout: added-with-row and
//! removed-by-id, never a coarse refresh.

use tokio::sync::broadcast;

use crate::types::message::{TabId, TabMessage, TabSignal};

/// Channel namespace shared by all tabs of this deployment.
pub const CHANNEL_NAMESPACE: &str = "smart-bookmarks";

const CHANNEL_CAPACITY: usize = 256;

/// Hub standing in for the browser's ambient broadcast primitive.
///
/// One hub per namespace; every tab joins the same hub. Cloning yields a
/// handle to the same underlying channel.
#[derive(Clone)]
pub struct BroadcastHub {
    namespace: String,
    tx: broadcast::Sender<TabMessage>,
}

impl BroadcastHub {
    /// Creates the hub for the default namespace.
    pub fn new() -> Self {
        Self::with_namespace(CHANNEL_NAMESPACE)
    }

    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            namespace: namespace.into(),
            tx,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Joins the channel as the given tab, opening a receive handle.
    /// Only messages sent after joining are observed.
    pub fn join(&self, tab_id: TabId) -> TabChannel {
        TabChannel {
            tab_id,
            tx: self.tx.clone(),
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}

/// A single tab's handle on the cross-tab channel.
///
/// Must be closed (or dropped) on view teardown so no handler outlives the
/// view that opened it.
pub struct TabChannel {
    tab_id: TabId,
    tx: broadcast::Sender<TabMessage>,
    rx: broadcast::Receiver<TabMessage>,
}

impl TabChannel {
    pub fn tab_id(&self) -> &TabId {
        &self.tab_id
    }

    /// Publishes a signal to sibling tabs, tagged with this tab's identity
    /// and the acting user. Delivery to zero receivers is not an error.
    pub fn send(&self, user_id: &str, signal: TabSignal) {
        let message = TabMessage {
            tab_id: self.tab_id.clone(),
            user_id: user_id.to_string(),
            signal,
        };
        let _ = self.tx.send(message);
    }

    /// Waits for the next signal from another tab addressed to `user_id`.
    /// Returns `None` once the channel is closed.
    pub async fn recv(&mut self, user_id: &str) -> Option<TabSignal> {
        loop {
            match self.rx.recv().await {
                Ok(message) if self.accepts(&message, user_id) => return Some(message.signal),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "cross-tab channel lagged, messages dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Drains signals already delivered for `user_id`, without waiting.
    /// Self-echoes and other users' messages are discarded.
    pub fn drain(&mut self, user_id: &str) -> Vec<TabSignal> {
        let mut signals = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(message) if self.accepts(&message, user_id) => signals.push(message.signal),
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "cross-tab channel lagged, messages dropped");
                    continue;
                }
                Err(_) => break,
            }
        }
        signals
    }

    /// Closes the channel handle. Dropping it has the same effect; this
    /// makes the teardown explicit at call sites.
    pub fn close(self) {}

    fn accepts(&self, message: &TabMessage, user_id: &str) -> bool {
        message.tab_id != self.tab_id && message.user_id == user_id
    }
}
