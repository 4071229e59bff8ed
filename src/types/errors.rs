use std::fmt;

// === AuthError ===

/// Errors from the external identity provider.
#[derive(Debug)]
pub enum AuthError {
    /// The provider could not be reached or returned a failure.
    Provider(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Provider(msg) => write!(f, "Identity provider error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

// === RemoteError ===

/// Errors from the remote data store.
#[derive(Debug)]
pub enum RemoteError {
    /// The remote store could not be reached.
    Network(String),
    /// The remote store rejected the request.
    Rejected(String),
    /// No row with the given id exists.
    NotFound(String),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Network(msg) => write!(f, "Remote store network error: {}", msg),
            RemoteError::Rejected(msg) => write!(f, "Remote store rejected request: {}", msg),
            RemoteError::NotFound(id) => write!(f, "Remote row not found: {}", id),
        }
    }
}

impl std::error::Error for RemoteError {}

// === MutationError ===

/// Errors from the add/delete mutation operations.
#[derive(Debug)]
pub enum MutationError {
    /// The title was empty after trimming. Rejected before any network call.
    EmptyTitle,
    /// The url was empty after trimming. Rejected before any network call.
    EmptyUrl,
    /// A submit is already in flight; duplicate submission is refused.
    SubmitInFlight,
    /// The remote write failed; local state has been rolled back.
    Remote(RemoteError),
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationError::EmptyTitle => write!(f, "Bookmark title must not be empty"),
            MutationError::EmptyUrl => write!(f, "Bookmark url must not be empty"),
            MutationError::SubmitInFlight => write!(f, "A submit is already in flight"),
            MutationError::Remote(e) => write!(f, "Remote write failed: {}", e),
        }
    }
}

impl std::error::Error for MutationError {}

impl From<RemoteError> for MutationError {
    fn from(e: RemoteError) -> Self {
        MutationError::Remote(e)
    }
}
