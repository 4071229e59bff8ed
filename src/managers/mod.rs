// Smartmarks synchronization core
// Managers handle the stateful pieces: the local store, session guarding,
// the remote change feed, the cross-tab channel, and optimistic mutations.

pub mod bookmark_store;
pub mod broadcaster;
pub mod mutations;
pub mod search;
pub mod session_guard;
pub mod sync_channel;
