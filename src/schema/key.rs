//! Logical key identifiers and typed key handles.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// A closed set of logical key identifiers.
///
/// Usually implemented by a fieldless enum. [`name`](Self::name) is the
/// string the adaptor sees and must be distinct for distinct identifiers;
/// [`KeySchemaBuilder::build`](super::KeySchemaBuilder::build) rejects
/// collisions.
///
/// # Example
///
/// ```
/// use reactive_kv::StorageKey;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Settings {
///     Theme,
///     LaunchCount,
/// }
///
/// impl StorageKey for Settings {
///     fn name(&self) -> &'static str {
///         match self {
///             Settings::Theme => "theme",
///             Settings::LaunchCount => "launch-count",
///         }
///     }
/// }
/// ```
pub trait StorageKey: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    fn name(&self) -> &'static str;
}

impl StorageKey for &'static str {
    fn name(&self) -> &'static str {
        self
    }
}

/// A logical key bound to the type of value it stores.
///
/// `Key` is how typed access is checked: `get` on a `Key<_, u32>` yields a
/// `u32`. Handles are `const`-constructible so schemas can declare them as
/// associated constants.
pub struct Key<K, T> {
    id: K,
    _value: PhantomData<fn() -> T>,
}

impl<K, T> Key<K, T> {
    pub const fn new(id: K) -> Self {
        Self {
            id,
            _value: PhantomData,
        }
    }
}

impl<K: StorageKey, T> Key<K, T> {
    pub fn id(&self) -> K {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }
}

impl<K: Copy, T> Clone for Key<K, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Copy, T> Copy for Key<K, T> {}

impl<K: fmt::Debug, T> fmt::Debug for Key<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("id", &self.id)
            .field("value", &std::any::type_name::<T>())
            .finish()
    }
}

/// Whether a key survives [`ReactiveStorage::clear`](crate::ReactiveStorage::clear).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Persistence {
    /// Kept by `clear`.
    Persistent,
    /// Removed by `clear`.
    #[default]
    Volatile,
}

impl Persistence {
    pub fn is_persistent(self) -> bool {
        matches!(self, Self::Persistent)
    }
}

impl From<bool> for Persistence {
    fn from(persistent: bool) -> Self {
        if persistent {
            Self::Persistent
        } else {
            Self::Volatile
        }
    }
}
