use serde::{Deserialize, Serialize};

/// An authenticated session as reported by the external identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
}

/// Asynchronous session-change notification from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChange {
    SignedIn(Session),
    SignedOut,
}
