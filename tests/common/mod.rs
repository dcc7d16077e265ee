//! Common test utilities and fixtures.
//!
//! This module provides the shared key set, schema and listener recorder used
//! across the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use reactive_kv::{Codec, Key, KeySchema, MemoryAdaptor, Persistence, ReactiveStorage, StorageKey};

// =============================================================================
// Key Set
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppKey {
    Count,
    Name,
    Items,
    Token,
}

impl StorageKey for AppKey {
    fn name(&self) -> &'static str {
        match self {
            AppKey::Count => "count",
            AppKey::Name => "name",
            AppKey::Items => "items",
            AppKey::Token => "token",
        }
    }
}

pub const COUNT: Key<AppKey, i64> = Key::new(AppKey::Count);
pub const NAME: Key<AppKey, String> = Key::new(AppKey::Name);
pub const ITEMS: Key<AppKey, Vec<String>> = Key::new(AppKey::Items);
pub const TOKEN: Key<AppKey, String> = Key::new(AppKey::Token);

// =============================================================================
// Test Storage
// =============================================================================

/// Schema used by most tests:
/// `count` volatile, `name` persistent, `items` JSON persistent, `token` volatile.
pub fn app_schema() -> anyhow::Result<KeySchema<AppKey>> {
    Ok(KeySchema::builder()
        .entry(COUNT, Codec::text(), Persistence::Volatile)
        .string(NAME, Persistence::Persistent)
        .entry(ITEMS, Codec::json(), Persistence::Persistent)
        .string(TOKEN, Persistence::Volatile)
        .build()?)
}

/// A facade over a fresh in-memory adaptor.
pub struct TestStorage {
    pub adaptor: Arc<MemoryAdaptor>,
    pub storage: ReactiveStorage<AppKey, MemoryAdaptor>,
}

impl TestStorage {
    pub fn new() -> anyhow::Result<Self> {
        let adaptor = Arc::new(MemoryAdaptor::new());
        let storage = ReactiveStorage::new(Arc::clone(&adaptor), app_schema()?);
        Ok(Self { adaptor, storage })
    }
}

// =============================================================================
// Listener Recorder
// =============================================================================

/// Records every value a listener receives.
pub struct Recorder<T> {
    seen: Arc<Mutex<Vec<Option<T>>>>,
}

impl<T: Clone + Send + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A listener closure appending to this recorder.
    pub fn listener(&self) -> impl Fn(Option<T>) + Send + Sync + use<T> {
        let seen = Arc::clone(&self.seen);
        move |value| {
            if let Ok(mut seen) = seen.lock() {
                seen.push(value);
            }
        }
    }

    pub fn values(&self) -> Vec<Option<T>> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.values().len()
    }
}
