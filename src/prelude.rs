//! Convenient re-exports for common usage patterns.
//!
//! This module provides a single import to bring all commonly used types
//! into scope.
//!
//! # Example
//!
//! ```ignore
//! use reactive_kv::prelude::*;
//!
//! let schema = KeySchema::builder()
//!     .string(THEME, Persistence::Persistent)
//!     .build()?;
//! let storage = ReactiveStorage::new(Arc::new(MemoryAdaptor::new()), schema);
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Adaptor contract and bundled adaptors
pub use crate::adaptor::{Adaptor, AdaptorError, MemoryAdaptor, Namespaced, RawListener, Unregister};

// Codecs
pub use crate::codec::{Codec, CodecError};

// Schema
pub use crate::schema::{Key, KeySchema, KeySchemaBuilder, Persistence, SchemaError, StorageKey};

// Facade
pub use crate::storage::{ReactiveStorage, RegisterOptions};

// Configuration (requires "config" feature)
#[cfg(feature = "config")]
pub use crate::config::{ConfigError, StorageConfig};
