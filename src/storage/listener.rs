//! Typed listener wrapping.

use std::fmt;
use std::sync::Arc;

use crate::adaptor::RawListener;
use crate::codec::{Codec, CodecError};
use crate::logging::warn;

type ErrorHandler = Arc<dyn Fn(&str, &CodecError) + Send + Sync>;

/// Options for [`ReactiveStorage::register_listener`](super::ReactiveStorage::register_listener).
#[derive(Clone, Default)]
pub struct RegisterOptions {
    on_error: Option<ErrorHandler>,
}

impl RegisterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive decode failures instead of having them logged and dropped.
    ///
    /// The handler gets the storage name of the key and the codec error. The
    /// listener itself is not invoked for a payload that fails to decode.
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, &CodecError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for RegisterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterOptions")
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Compose a raw-payload listener from a typed one.
///
/// `None` passes through untouched; `Some(raw)` is decoded with `codec`.
pub(crate) fn decoding_listener<T, F>(
    name: &'static str,
    codec: Codec<T>,
    listener: F,
    options: RegisterOptions,
) -> RawListener
where
    T: 'static,
    F: Fn(Option<T>) + Send + Sync + 'static,
{
    Arc::new(move |raw: Option<&str>| match raw {
        None => listener(None),
        Some(raw) => match codec.deserialize(raw) {
            Ok(value) => listener(Some(value)),
            Err(err) => match &options.on_error {
                Some(handler) => handler(name, &err),
                None => {
                    warn!(key = name, error = %err, "dropping undecodable change notification");
                }
            },
        },
    })
}
