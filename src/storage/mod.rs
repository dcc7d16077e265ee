//! The reactive storage facade.
//!
//! [`ReactiveStorage`] turns a raw string [`Adaptor`] into typed, observable
//! storage for the keys declared in a [`KeySchema`]. It keeps no state of its
//! own beyond the schema: values live in the adaptor, and listeners are
//! registered with the adaptor wrapped in a decoding closure.

mod listener;

use std::any::type_name;
use std::sync::Arc;

use crate::adaptor::{Adaptor, Unregister};
use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::logging::{debug, error, info, trace};
use crate::schema::{Key, KeySchema, SchemaEntry, StorageKey};

pub use listener::RegisterOptions;

/// Typed, observable key-value storage over a shared [`Adaptor`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use reactive_kv::{Codec, Key, KeySchema, MemoryAdaptor, Persistence, ReactiveStorage};
///
/// const COUNT: Key<&str, u32> = Key::new("count");
/// const NAME: Key<&str, String> = Key::new("name");
///
/// let schema = KeySchema::builder()
///     .entry(COUNT, Codec::text(), Persistence::Volatile)
///     .string(NAME, Persistence::Persistent)
///     .build()?;
/// let storage = ReactiveStorage::new(Arc::new(MemoryAdaptor::new()), schema);
///
/// storage.set(&COUNT, &42)?;
/// storage.set(&NAME, &"x".to_string())?;
/// storage.clear()?;
///
/// assert_eq!(storage.get(&COUNT)?, None);
/// assert_eq!(storage.get(&NAME)?.as_deref(), Some("x"));
/// # Ok::<(), reactive_kv::Error>(())
/// ```
pub struct ReactiveStorage<K, A: ?Sized> {
    adaptor: Arc<A>,
    schema: KeySchema<K>,
}

impl<K: StorageKey, A: Adaptor + ?Sized> ReactiveStorage<K, A> {
    pub fn new(adaptor: Arc<A>, schema: KeySchema<K>) -> Self {
        info!(
            keys = schema.len(),
            persistent = schema.persistent_keys().count(),
            "reactive storage created"
        );
        Self { adaptor, schema }
    }

    pub fn schema(&self) -> &KeySchema<K> {
        &self.schema
    }

    pub fn adaptor(&self) -> &Arc<A> {
        &self.adaptor
    }

    /// Read and decode the value of `key`; `None` if nothing is stored.
    pub fn get<T: 'static>(&self, key: &Key<K, T>) -> Result<Option<T>> {
        let (name, codec) = self.typed_entry(key)?;
        let Some(raw) = self.adaptor.get(name)? else {
            trace!(key = name, "value absent");
            return Ok(None);
        };

        trace!(key = name, len = raw.len(), "decoding value");
        let value = codec
            .deserialize(&raw)
            .map_err(|source| Error::Codec { key: name, source })?;
        Ok(Some(value))
    }

    /// Read the raw stored string of `key` without decoding it.
    pub fn get_raw<T>(&self, key: &Key<K, T>) -> Result<Option<String>> {
        let name = self.entry(key)?.name();
        Ok(self.adaptor.get(name)?)
    }

    /// Encode `value` and store it under `key`.
    pub fn set<T: 'static>(&self, key: &Key<K, T>, value: &T) -> Result<()> {
        let (name, codec) = self.typed_entry(key)?;
        let raw = codec
            .serialize(value)
            .map_err(|source| Error::Codec { key: name, source })?;

        trace!(key = name, len = raw.len(), "writing value");
        self.adaptor.set(name, &raw)?;
        Ok(())
    }

    pub fn remove<T>(&self, key: &Key<K, T>) -> Result<()> {
        let name = self.entry(key)?.name();
        trace!(key = name, "removing value");
        self.adaptor.remove(name)?;
        Ok(())
    }

    /// Whether a value is stored under `key`.
    pub fn contains<T>(&self, key: &Key<K, T>) -> Result<bool> {
        Ok(self.get_raw(key)?.is_some())
    }

    /// Remove every key not declared persistent.
    ///
    /// Keys are removed one at a time through [`Adaptor::remove`] in
    /// declaration order, so listeners on each removed key are notified with
    /// `None` by adaptors that notify on removal. The adaptor's bulk `clear`
    /// is never used. Stops at the first adaptor error.
    pub fn clear(&self) -> Result<()> {
        let volatile = self
            .schema
            .entries()
            .filter(|(_, entry)| !entry.is_persistent());
        for (_, entry) in volatile {
            if let Err(err) = self.adaptor.remove(entry.name()) {
                error!(key = entry.name(), error = %err, "clear aborted");
                return Err(err.into());
            }
        }

        debug!(
            removed = self.schema.volatile_keys().count(),
            kept = self.schema.persistent_keys().count(),
            "cleared volatile keys"
        );
        Ok(())
    }

    /// Call `callback` with the decoded value whenever `key` changes.
    ///
    /// The callback receives `None` when the key is removed. The returned
    /// handle is the only way to stop notifications; dropping it leaves the
    /// listener attached. `Ok(None)` means the adaptor could not establish the
    /// subscription.
    pub fn register_listener<T, F>(
        &self,
        key: &Key<K, T>,
        callback: F,
        options: RegisterOptions,
    ) -> Result<Option<Unregister>>
    where
        T: 'static,
        F: Fn(Option<T>) + Send + Sync + 'static,
    {
        let (name, codec) = self.typed_entry(key)?;
        let raw = listener::decoding_listener(name, codec.clone(), callback, options);

        let unregister = self.adaptor.on_value_changed(name, raw);
        debug!(
            key = name,
            established = unregister.is_some(),
            "registered listener"
        );
        Ok(unregister)
    }

    fn entry<T>(&self, key: &Key<K, T>) -> Result<&SchemaEntry> {
        self.schema
            .entry(key.id())
            .ok_or(Error::UnknownKey(key.name()))
    }

    fn typed_entry<T: 'static>(&self, key: &Key<K, T>) -> Result<(&'static str, &Codec<T>)> {
        let entry = self.entry(key)?;
        let codec = entry.codec::<T>().ok_or_else(|| Error::TypeMismatch {
            key: entry.name(),
            declared: entry.value_type(),
            requested: type_name::<T>(),
        })?;
        Ok((entry.name(), codec))
    }
}
