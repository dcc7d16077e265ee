//! In-memory adaptor.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::logging::{debug, trace};

use super::{Adaptor, AdaptorError, RawListener, Unregister};

/// Adaptor keeping values in process memory.
///
/// Listeners run synchronously on the thread performing the write, after the
/// write is visible and with no internal lock held, so a listener may read or
/// mutate the store.
///
/// Each write notifies the listeners registered when it started. A listener
/// unregistered by another listener during that notification still receives
/// it, and none after.
#[derive(Default)]
pub struct MemoryAdaptor {
    shared: Arc<Shared>,
}

#[derive(Default)]
struct Shared {
    values: Mutex<BTreeMap<String, String>>,
    listeners: Mutex<HashMap<String, Vec<(u64, RawListener)>>>,
    next_listener_id: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Shared {
    fn notify(&self, key: &str, value: Option<&str>) {
        let listeners: Vec<RawListener> = lock(&self.listeners)
            .get(key)
            .map(|registered| registered.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default();

        trace!(key = key, listeners = listeners.len(), "notifying listeners");
        for listener in listeners {
            listener(value);
        }
    }

    fn detach(&self, key: &str, id: u64) {
        let mut listeners = lock(&self.listeners);
        if let Some(registered) = listeners.get_mut(key) {
            registered.retain(|(existing, _)| *existing != id);
            debug!(key = key, id = id, remaining = registered.len(), "listener unregistered");
            if registered.is_empty() {
                listeners.remove(key);
            }
        }
    }
}

impl MemoryAdaptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        lock(&self.shared.values).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.shared.values).is_empty()
    }

    /// Number of listeners currently registered on `key`.
    pub fn listener_count(&self, key: &str) -> usize {
        lock(&self.shared.listeners).get(key).map_or(0, Vec::len)
    }
}

impl Adaptor for MemoryAdaptor {
    fn get(&self, key: &str) -> Result<Option<String>, AdaptorError> {
        Ok(lock(&self.shared.values).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AdaptorError> {
        lock(&self.shared.values).insert(key.to_owned(), value.to_owned());
        self.shared.notify(key, Some(value));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AdaptorError> {
        lock(&self.shared.values).remove(key);
        self.shared.notify(key, None);
        Ok(())
    }

    fn clear(&self) -> Result<(), AdaptorError> {
        let removed = std::mem::take(&mut *lock(&self.shared.values));
        for key in removed.keys() {
            self.shared.notify(key, None);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, AdaptorError> {
        Ok(lock(&self.shared.values).keys().cloned().collect())
    }

    fn on_value_changed(&self, key: &str, listener: RawListener) -> Option<Unregister> {
        let id = self.shared.next_listener_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.shared.listeners)
            .entry(key.to_owned())
            .or_default()
            .push((id, listener));

        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        let key = key.to_owned();
        Some(Unregister::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.detach(&key, id);
            }
        }))
    }
}
