//! Typed, observable key-value storage over pluggable string backends.
//!
//! reactive-kv sits between application code and a raw string key-value
//! backend (an [`Adaptor`]). Each logical key is declared once in a
//! [`KeySchema`] with a [`Codec`] and a persistence flag; the
//! [`ReactiveStorage`] facade then offers typed `get`/`set`/`remove`,
//! a selective `clear` that keeps persistent keys, and per-key change
//! listeners that receive decoded values.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use reactive_kv::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Prefs {
//!     Theme,
//!     Visits,
//! }
//!
//! impl StorageKey for Prefs {
//!     fn name(&self) -> &'static str {
//!         match self {
//!             Prefs::Theme => "theme",
//!             Prefs::Visits => "visits",
//!         }
//!     }
//! }
//!
//! const THEME: Key<Prefs, String> = Key::new(Prefs::Theme);
//! const VISITS: Key<Prefs, u64> = Key::new(Prefs::Visits);
//!
//! let schema = KeySchema::builder()
//!     .string(THEME, Persistence::Persistent)
//!     .entry(VISITS, Codec::text(), Persistence::Volatile)
//!     .build()?;
//! let storage = ReactiveStorage::new(Arc::new(MemoryAdaptor::new()), schema);
//!
//! let handle = storage.register_listener(
//!     &VISITS,
//!     |visits| println!("visits is now {visits:?}"),
//!     RegisterOptions::new(),
//! )?;
//!
//! storage.set(&VISITS, &1)?;
//! assert_eq!(storage.get(&VISITS)?, Some(1));
//!
//! if let Some(handle) = handle {
//!     handle.unregister();
//! }
//! # Ok::<(), reactive_kv::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`adaptor`] - The backend contract, an in-memory adaptor and a namespacing decorator
//! - [`codec`] - Typed serialize/deserialize pairs
//! - [`schema`] - Logical keys and the key schema builder
//! - [`storage`] - The reactive storage facade
//! - [`config`] - TOML configuration (requires `config` feature)
//!
//! # Feature Flags
//!
//! - `json` - Enable [`Codec::json`] (enabled by default)
//! - `config` - Enable TOML configuration loading
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `full` - Enable all features

pub mod adaptor;
pub mod codec;
#[cfg(feature = "config")]
pub mod config;
mod error;
mod logging;
pub mod prelude;
pub mod schema;
pub mod storage;

// Re-export the unified error type
pub use error::{Error, Result};

pub use adaptor::{Adaptor, AdaptorError, MemoryAdaptor, Namespaced, RawListener, Unregister};
pub use codec::{Codec, CodecError};
#[cfg(feature = "config")]
pub use config::{ConfigError, StorageConfig};
pub use schema::{Key, KeySchema, KeySchemaBuilder, Persistence, SchemaEntry, SchemaError, StorageKey};
pub use storage::{ReactiveStorage, RegisterOptions};
