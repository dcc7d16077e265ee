//! Key-prefixing adaptor decorator.

use std::sync::Arc;

#[cfg(feature = "config")]
use crate::config::StorageConfig;

use super::{Adaptor, AdaptorError, RawListener, Unregister};

/// Separator placed between the namespace and the key.
pub const DEFAULT_SEPARATOR: &str = "_";

/// Isolates a set of keys inside a shared adaptor by prefixing each key with
/// `{namespace}{separator}`.
///
/// Several facades may share one physical store this way without seeing each
/// other's keys. [`keys`](Adaptor::keys) and [`clear`](Adaptor::clear) are
/// scoped to the namespace and require the inner adaptor to enumerate keys.
///
/// A namespace may not contain any character of its separator, and the
/// separator may not be empty. Otherwise one prefix could start another
/// (`app_` and `app_x_`) and the namespaces would overlap.
pub struct Namespaced<A: ?Sized> {
    inner: Arc<A>,
    prefix: String,
}

impl<A: Adaptor + ?Sized> Namespaced<A> {
    pub fn new(inner: Arc<A>, namespace: &str) -> Result<Self, AdaptorError> {
        Self::with_separator(inner, namespace, DEFAULT_SEPARATOR)
    }

    pub fn with_separator(
        inner: Arc<A>,
        namespace: &str,
        separator: &str,
    ) -> Result<Self, AdaptorError> {
        let invalid = |reason| AdaptorError::InvalidNamespace {
            namespace: namespace.to_owned(),
            separator: separator.to_owned(),
            reason,
        };
        if separator.is_empty() {
            return Err(invalid("separator is empty"));
        }
        if namespace.chars().any(|c| separator.contains(c)) {
            return Err(invalid("namespace contains a separator character"));
        }

        Ok(Self {
            inner,
            prefix: format!("{namespace}{separator}"),
        })
    }

    /// Build from configuration; `Ok(None)` when no namespace is configured.
    #[cfg(feature = "config")]
    pub fn from_config(
        inner: Arc<A>,
        config: &StorageConfig,
    ) -> Result<Option<Self>, AdaptorError> {
        config
            .namespace
            .as_deref()
            .map(|namespace| Self::with_separator(inner, namespace, &config.separator))
            .transpose()
    }

    /// The prefix applied to every key.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn inner(&self) -> &Arc<A> {
        &self.inner
    }

    fn qualify(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl<A: Adaptor + ?Sized> Adaptor for Namespaced<A> {
    fn get(&self, key: &str) -> Result<Option<String>, AdaptorError> {
        self.inner.get(&self.qualify(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AdaptorError> {
        self.inner.set(&self.qualify(key), value)
    }

    fn remove(&self, key: &str) -> Result<(), AdaptorError> {
        self.inner.remove(&self.qualify(key))
    }

    fn clear(&self) -> Result<(), AdaptorError> {
        for key in self.keys()? {
            self.remove(&key)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, AdaptorError> {
        Ok(self
            .inner
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&self.prefix).map(str::to_owned))
            .collect())
    }

    fn on_value_changed(&self, key: &str, listener: RawListener) -> Option<Unregister> {
        self.inner.on_value_changed(&self.qualify(key), listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptor::MemoryAdaptor;

    #[test]
    fn test_prefixes_keys() {
        let store = Arc::new(MemoryAdaptor::new());
        let app = Namespaced::new(Arc::clone(&store), "app").unwrap();

        app.set("theme", "dark").unwrap();
        assert_eq!(store.get("app_theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(app.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(app.prefix(), "app_");
    }

    #[test]
    fn test_clear_is_scoped() {
        let store = Arc::new(MemoryAdaptor::new());
        let app = Namespaced::with_separator(Arc::clone(&store), "app", ":").unwrap();
        let other = Namespaced::with_separator(Arc::clone(&store), "other", ":").unwrap();

        app.set("a", "1").unwrap();
        app.set("b", "2").unwrap();
        other.set("a", "3").unwrap();
        store.set("bare", "4").unwrap();

        assert_eq!(app.keys().unwrap(), vec!["a", "b"]);
        app.clear().unwrap();

        assert!(app.keys().unwrap().is_empty());
        assert_eq!(other.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.get("bare").unwrap().as_deref(), Some("4"));
    }

    #[test]
    fn test_nested_namespace_rejected() {
        let store = Arc::new(MemoryAdaptor::new());
        let app = Namespaced::new(Arc::clone(&store), "app").unwrap();

        let err = Namespaced::new(Arc::clone(&store), "app_x").err().unwrap();
        assert!(matches!(err, AdaptorError::InvalidNamespace { .. }));

        // "x_count" under "app" is still just a key of "app".
        app.set("x_count", "7").unwrap();
        assert_eq!(store.get("app_x_count").unwrap().as_deref(), Some("7"));
        assert_eq!(app.keys().unwrap(), vec!["x_count"]);
    }

    #[test]
    fn test_overlapping_separator_rejected() {
        let store = Arc::new(MemoryAdaptor::new());
        assert!(Namespaced::with_separator(Arc::clone(&store), "xa", "aa").is_err());
        assert!(Namespaced::with_separator(Arc::clone(&store), "x", "").is_err());

        let x = Namespaced::with_separator(Arc::clone(&store), "x", "aa").unwrap();
        let y = Namespaced::with_separator(Arc::clone(&store), "y", "aa").unwrap();
        y.set("k", "1").unwrap();
        assert!(x.keys().unwrap().is_empty());
        x.clear().unwrap();
        assert_eq!(y.get("k").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_listeners_see_unprefixed_key_only() {
        let store = Arc::new(MemoryAdaptor::new());
        let app = Namespaced::new(Arc::clone(&store), "app").unwrap();
        let hits = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        app.on_value_changed(
            "k",
            Arc::new(move |_: Option<&str>| {
                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }),
        )
        .unwrap();

        store.set("k", "unrelated").unwrap();
        app.set("k", "v").unwrap();

        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
