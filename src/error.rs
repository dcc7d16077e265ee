//! Unified error type for the reactive-kv library.
//!
//! This module provides a single [`Error`] type that encompasses all errors
//! that can occur in the library, making it easier to handle errors in
//! application code.

use thiserror::Error;

use crate::adaptor::AdaptorError;
use crate::codec::CodecError;
#[cfg(feature = "config")]
use crate::config::ConfigError;
use crate::schema::SchemaError;

/// Unified error type for all reactive-kv operations.
///
/// # Example
///
/// ```ignore
/// use reactive_kv::{Result, ReactiveStorage};
///
/// fn bump(storage: &ReactiveStorage<Keys, MemoryAdaptor>) -> Result<()> {
///     let count = storage.get(&COUNT)?.unwrap_or(0);
///     storage.set(&COUNT, &(count + 1))?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A value could not be encoded or decoded with the key's codec.
    #[error("codec error for key '{key}': {source}")]
    Codec {
        key: &'static str,
        #[source]
        source: CodecError,
    },

    /// Error reported by the storage adaptor, passed through unchanged.
    #[error(transparent)]
    Adaptor(#[from] AdaptorError),

    /// The key schema could not be built.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Configuration could not be loaded.
    #[cfg(feature = "config")]
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The key is not part of the facade's schema.
    #[error("key '{0}' is not declared in the schema")]
    UnknownKey(&'static str),

    /// The key was declared with a codec for a different value type.
    #[error("key '{key}' stores {declared}, not {requested}")]
    TypeMismatch {
        key: &'static str,
        declared: &'static str,
        requested: &'static str,
    },
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is a codec error.
    pub fn is_codec(&self) -> bool {
        matches!(self, Self::Codec { .. })
    }

    /// Returns `true` if this is an adaptor error.
    pub fn is_adaptor(&self) -> bool {
        matches!(self, Self::Adaptor(_))
    }

    /// The storage name of the key involved, when the error concerns one.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::Codec { key, .. } | Self::TypeMismatch { key, .. } | Self::UnknownKey(key) => {
                Some(*key)
            }
            _ => None,
        }
    }
}
