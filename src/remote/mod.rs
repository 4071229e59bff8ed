// External collaborators for Smartmarks.
// The identity provider and remote data store are injected trait objects so
// the synchronization core never touches a process-wide singleton.

pub mod data_store;
pub mod identity;
pub mod memory;

pub use data_store::{ChangeEvent, FeedSubscription, RemoteStore};
pub use identity::IdentityProvider;
pub use memory::{MemoryIdentityProvider, MemoryRemoteStore};
