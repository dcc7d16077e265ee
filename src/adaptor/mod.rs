//! Raw string storage backends.
//!
//! An [`Adaptor`] persists string values under string keys and pushes change
//! notifications to per-key listeners. The environment supplies the concrete
//! backend; this module ships an in-memory store and a namespacing
//! decorator.
//!
//! # Contract
//!
//! - `set` persists the value and notifies listeners of that key with
//!   `Some(value)`.
//! - `remove` deletes the value so that `get` returns `None`, and notifies
//!   listeners with `None`.
//! - `on_value_changed` supports any number of independent registrations on
//!   the same key; each returned [`Unregister`] detaches exactly its own
//!   listener.

mod error;
mod memory;
mod namespaced;
mod unregister;

use std::sync::Arc;

pub use error::AdaptorError;
pub use memory::MemoryAdaptor;
pub use namespaced::{DEFAULT_SEPARATOR, Namespaced};
pub use unregister::Unregister;

/// Listener receiving the raw payload of a change: `None` means removed.
pub type RawListener = Arc<dyn Fn(Option<&str>) + Send + Sync>;

/// A raw string key-value backend with change notification.
pub trait Adaptor: Send + Sync {
    /// Return the persisted value, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, AdaptorError>;

    /// Persist `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), AdaptorError>;

    /// Delete the value stored under `key`.
    fn remove(&self, key: &str) -> Result<(), AdaptorError>;

    /// Remove every stored key.
    fn clear(&self) -> Result<(), AdaptorError> {
        Err(AdaptorError::Unsupported("clear"))
    }

    /// List every stored key.
    fn keys(&self) -> Result<Vec<String>, AdaptorError> {
        Err(AdaptorError::Unsupported("keys"))
    }

    /// Register a change listener for `key`.
    ///
    /// Returns `None` if the subscription could not be established.
    fn on_value_changed(&self, key: &str, listener: RawListener) -> Option<Unregister>;
}
