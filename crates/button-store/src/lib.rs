//! Persistent association of messages to their buttons.
//!
//! Buttons are stored per host message id, each keyed by its component id.
//! Backends implement [`KeyValueStore`]; [`ButtonRegistry`] layers
//! per-message serialization on top.

mod error;
mod registry;
mod store;
mod types;

pub use error::StoreError;
pub use registry::{ButtonRegistry, MessageGuard};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::*;
