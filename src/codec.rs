//! Typed serialize/deserialize pairs.
//!
//! A [`Codec`] converts between a typed value and the raw string form an
//! [`Adaptor`](crate::Adaptor) persists. Every key in a
//! [`KeySchema`](crate::KeySchema) carries exactly one codec; there is no
//! implicit default, string keys opt into [`Codec::identity`] explicitly.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

/// Errors produced while encoding or decoding a value.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("cannot parse {type_name} from {input:?}: {message}")]
    Parse {
        type_name: &'static str,
        input: String,
        message: String,
    },

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

impl CodecError {
    /// Create a codec error from an arbitrary message.
    pub fn custom(msg: impl fmt::Display) -> Self {
        Self::Custom(anyhow::anyhow!("{}", msg))
    }
}

type SerializeFn<T> = dyn Fn(&T) -> Result<String, CodecError> + Send + Sync;
type DeserializeFn<T> = dyn Fn(&str) -> Result<T, CodecError> + Send + Sync;

/// A serialize/deserialize pair for values of type `T`.
///
/// Cloning is cheap: both functions are reference counted.
pub struct Codec<T> {
    serialize: Arc<SerializeFn<T>>,
    deserialize: Arc<DeserializeFn<T>>,
}

impl<T: 'static> Codec<T> {
    /// Build a codec from two fallible functions.
    pub fn new<S, D>(serialize: S, deserialize: D) -> Self
    where
        S: Fn(&T) -> Result<String, CodecError> + Send + Sync + 'static,
        D: Fn(&str) -> Result<T, CodecError> + Send + Sync + 'static,
    {
        Self {
            serialize: Arc::new(serialize),
            deserialize: Arc::new(deserialize),
        }
    }

    /// Build a codec from two functions that cannot fail.
    pub fn from_fns<S, D>(serialize: S, deserialize: D) -> Self
    where
        S: Fn(&T) -> String + Send + Sync + 'static,
        D: Fn(&str) -> T + Send + Sync + 'static,
    {
        Self::new(
            move |value| Ok(serialize(value)),
            move |raw| Ok(deserialize(raw)),
        )
    }

    pub fn serialize(&self, value: &T) -> Result<String, CodecError> {
        (self.serialize)(value)
    }

    pub fn deserialize(&self, raw: &str) -> Result<T, CodecError> {
        (self.deserialize)(raw)
    }
}

impl Codec<String> {
    /// The identity codec: the stored string is the value.
    pub fn identity() -> Self {
        Self::from_fns(|value: &String| value.clone(), str::to_owned)
    }
}

impl<T> Codec<T>
where
    T: FromStr + fmt::Display + 'static,
    T::Err: fmt::Display,
{
    /// A codec using `Display` to write and `FromStr` to read.
    ///
    /// Suitable for numbers, booleans and other scalar types whose textual
    /// form round-trips.
    pub fn text() -> Self {
        Self::new(
            |value: &T| Ok(value.to_string()),
            |raw| {
                raw.parse::<T>().map_err(|e| CodecError::Parse {
                    type_name: std::any::type_name::<T>(),
                    input: raw.to_owned(),
                    message: e.to_string(),
                })
            },
        )
    }
}

#[cfg(feature = "json")]
impl<T> Codec<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + 'static,
{
    /// A codec storing the value as a JSON document.
    pub fn json() -> Self {
        Self::new(
            |value: &T| Ok(serde_json::to_string(value)?),
            |raw| Ok(serde_json::from_str(raw)?),
        )
    }
}

impl<T> Clone for Codec<T> {
    fn clone(&self) -> Self {
        Self {
            serialize: Arc::clone(&self.serialize),
            deserialize: Arc::clone(&self.deserialize),
        }
    }
}

impl<T> fmt::Debug for Codec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("type", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_keeps_empty_string() {
        let codec = Codec::identity();
        assert_eq!(codec.serialize(&String::new()).unwrap(), "");
        assert_eq!(codec.deserialize("").unwrap(), "");
    }

    #[test]
    fn test_text_codec() {
        let codec = Codec::<i64>::text();
        assert_eq!(codec.serialize(&-42).unwrap(), "-42");
        assert_eq!(codec.deserialize("17").unwrap(), 17);
    }

    #[test]
    fn test_text_codec_rejects_malformed_input() {
        let codec = Codec::<u32>::text();
        let err = codec.deserialize("forty-two").unwrap_err();
        match err {
            CodecError::Parse { type_name, input, .. } => {
                assert_eq!(type_name, "u32");
                assert_eq!(input, "forty-two");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_codec() {
        let codec = Codec::<Vec<String>>::json();
        let items = vec!["a".to_string(), "b".to_string()];
        let raw = codec.serialize(&items).unwrap();
        assert_eq!(raw, r#"["a","b"]"#);
        assert_eq!(codec.deserialize(&raw).unwrap(), items);
        assert!(matches!(codec.deserialize("not json"), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_custom_codec_error() {
        let codec = Codec::<bool>::new(
            |v| Ok(if *v { "yes" } else { "no" }.to_string()),
            |raw| match raw {
                "yes" => Ok(true),
                "no" => Ok(false),
                other => Err(CodecError::custom(format!("not a flag: {other}"))),
            },
        );
        assert_eq!(codec.serialize(&true).unwrap(), "yes");
        assert!(!codec.deserialize("no").unwrap());
        let err = codec.deserialize("maybe").unwrap_err();
        assert_eq!(err.to_string(), "not a flag: maybe");
    }

    #[test]
    fn test_clone_shares_functions() {
        let codec = Codec::<u8>::text();
        let copy = codec.clone();
        assert_eq!(copy.deserialize("7").unwrap(), 7);
        assert!(format!("{copy:?}").contains("u8"));
    }
}
