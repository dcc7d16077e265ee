//! Key schema: the fixed set of logical keys a facade serves.
//!
//! A [`KeySchema`] is built once with [`KeySchemaBuilder`] and never changes
//! afterwards. Each entry holds the key's storage name, its codec and its
//! persistence flag.

mod error;
mod key;

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "config")]
use std::collections::BTreeMap;

use crate::codec::Codec;
use crate::logging::debug;

pub use error::SchemaError;
pub use key::{Key, Persistence, StorageKey};

#[cfg(feature = "config")]
use crate::config::StorageConfig;

/// One normalized schema entry.
#[derive(Clone)]
pub struct SchemaEntry {
    name: &'static str,
    persistent: bool,
    value_type: &'static str,
    codec: Arc<dyn Any + Send + Sync>,
}

impl SchemaEntry {
    fn new<T: 'static>(name: &'static str, codec: Codec<T>, persistence: Persistence) -> Self {
        Self {
            name,
            persistent: persistence.is_persistent(),
            value_type: type_name::<T>(),
            codec: Arc::new(codec),
        }
    }

    /// The adaptor-level key.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Name of the value type the codec was declared with.
    pub fn value_type(&self) -> &'static str {
        self.value_type
    }

    /// The codec, if it was declared for values of type `T`.
    pub fn codec<T: 'static>(&self) -> Option<&Codec<T>> {
        self.codec.downcast_ref::<Codec<T>>()
    }
}

impl fmt::Debug for SchemaEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaEntry")
            .field("name", &self.name)
            .field("persistent", &self.persistent)
            .field("value_type", &self.value_type)
            .finish()
    }
}

/// Immutable map from logical key to [`SchemaEntry`], in declaration order.
#[derive(Clone)]
pub struct KeySchema<K> {
    entries: Vec<(K, SchemaEntry)>,
    index: HashMap<K, usize>,
}

impl<K: StorageKey> KeySchema<K> {
    pub fn builder() -> KeySchemaBuilder<K> {
        KeySchemaBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: K) -> bool {
        self.index.contains_key(&key)
    }

    pub fn entry(&self, key: K) -> Option<&SchemaEntry> {
        let position = *self.index.get(&key)?;
        self.entries.get(position).map(|(_, entry)| entry)
    }

    /// The storage name of `key`, if declared.
    pub fn name_of(&self, key: K) -> Option<&'static str> {
        self.entry(key).map(SchemaEntry::name)
    }

    /// Whether `key` is declared persistent. Undeclared keys are not.
    pub fn is_persistent(&self, key: K) -> bool {
        self.entry(key).is_some_and(SchemaEntry::is_persistent)
    }

    /// Declared keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (K, &SchemaEntry)> + '_ {
        self.entries.iter().map(|(key, entry)| (*key, entry))
    }

    /// Keys removed by `clear`.
    pub fn volatile_keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries()
            .filter(|(_, entry)| !entry.is_persistent())
            .map(|(key, _)| key)
    }

    /// Keys kept by `clear`.
    pub fn persistent_keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries()
            .filter(|(_, entry)| entry.is_persistent())
            .map(|(key, _)| key)
    }
}

impl<K: fmt::Debug> fmt::Debug for KeySchema<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, e)| (k, e)))
            .finish()
    }
}

/// Collects key declarations and normalizes them into a [`KeySchema`].
///
/// # Example
///
/// ```
/// use reactive_kv::{Codec, Key, KeySchema, Persistence};
///
/// const COUNT: Key<&str, u32> = Key::new("count");
/// const NAME: Key<&str, String> = Key::new("name");
///
/// let schema = KeySchema::builder()
///     .entry(COUNT, Codec::text(), Persistence::Volatile)
///     .string(NAME, Persistence::Persistent)
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.len(), 2);
/// assert!(schema.is_persistent("name"));
/// ```
pub struct KeySchemaBuilder<K> {
    entries: Vec<(K, SchemaEntry)>,
    #[cfg(feature = "config")]
    overrides: BTreeMap<String, bool>,
}

impl<K: StorageKey> KeySchemaBuilder<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            #[cfg(feature = "config")]
            overrides: BTreeMap::new(),
        }
    }

    /// Declare `key` with its codec and persistence.
    ///
    /// Declaring the same key again replaces the earlier declaration but keeps
    /// its position.
    pub fn entry<T: 'static>(
        mut self,
        key: Key<K, T>,
        codec: Codec<T>,
        persistence: Persistence,
    ) -> Self {
        let id = key.id();
        let entry = SchemaEntry::new(id.name(), codec, persistence);

        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => {
                debug!(key = entry.name, "replacing earlier key declaration");
                *slot = entry;
            }
            None => self.entries.push((id, entry)),
        }
        self
    }

    /// Declare a string-valued key stored as-is.
    pub fn string(self, key: Key<K, String>, persistence: Persistence) -> Self {
        self.entry(key, Codec::identity(), persistence)
    }

    /// Apply the persistence overrides of `config`, keyed by storage name.
    #[cfg(feature = "config")]
    pub fn with_config(mut self, config: &StorageConfig) -> Self {
        self.overrides
            .extend(config.persistence.iter().map(|(k, v)| (k.clone(), *v)));
        self
    }

    pub fn build(self) -> Result<KeySchema<K>, SchemaError> {
        #[cfg_attr(not(feature = "config"), allow(unused_mut))]
        let mut entries = self.entries;

        let mut by_name: HashMap<&'static str, K> = HashMap::with_capacity(entries.len());
        for (key, entry) in &entries {
            if let Some(first) = by_name.insert(entry.name, *key) {
                return Err(SchemaError::DuplicateName {
                    name: entry.name,
                    first: format!("{first:?}"),
                    second: format!("{key:?}"),
                });
            }
        }

        #[cfg(feature = "config")]
        for (name, persistent) in self.overrides {
            let (_, entry) = entries
                .iter_mut()
                .find(|(_, entry)| entry.name == name)
                .ok_or(SchemaError::UnknownKey(name))?;
            entry.persistent = persistent;
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(position, (key, _))| (*key, position))
            .collect();

        Ok(KeySchema { entries, index })
    }
}

impl<K: StorageKey> Default for KeySchemaBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}
