//! Error types for schema construction.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("keys {first} and {second} both map to storage name '{name}'")]
    DuplicateName {
        name: &'static str,
        first: String,
        second: String,
    },

    #[error("persistence override for undeclared key '{0}'")]
    UnknownKey(String),
}
