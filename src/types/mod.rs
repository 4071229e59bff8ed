// Smartmarks shared type definitions
// Each submodule defines types used across the synchronization core.

pub mod bookmark;
pub mod errors;
pub mod message;
pub mod session;
