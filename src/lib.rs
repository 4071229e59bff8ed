//! Smartmarks — client-side synchronization core for a real-time personal
//! bookmark manager.
//!
//! Keeps a local bookmark list correct under three independently-arriving
//! update sources: optimistic local mutations, a remote change feed, and
//! cross-tab broadcast messages. This library crate exposes all modules for
//! use by the binary and integration tests.

pub mod dashboard;
pub mod managers;
pub mod remote;
pub mod types;
