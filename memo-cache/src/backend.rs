//! Storage backends for the memoization cache.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use dashmap::DashMap;

use crate::key::CacheKey;

/// A thread-safe storage backend for cached values.
///
/// Backends only store entries. Writer coordination (the per-key locks) lives
/// in the cache, so a backend never runs user code while holding its own
/// locks.
///
/// # Contract
///
/// - `insert_if_absent` never overwrites: the first value stored for a key is
///   the one every later `get` returns, until `clear`
/// - `get` returns a copy; callers never hold a reference into the storage
pub trait Backend<V>: Send + Sync {
    /// Returns a copy of the value stored for `key`, if any.
    fn get(&self, key: &CacheKey) -> Option<V>;

    /// True if a value is stored for `key`.
    fn contains(&self, key: &CacheKey) -> bool;

    /// Stores `value` unless `key` already has one; returns the value that is
    /// stored afterwards.
    fn insert_if_absent(&self, key: CacheKey, value: V) -> V;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// True if no entries are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry.
    fn clear(&self);
}

/// A DashMap-based backend.
///
/// Sharded locking keeps unrelated keys from contending with each other.
/// This is the default backend.
#[derive(Debug)]
pub struct DashMapBackend<V> {
    data: DashMap<CacheKey, V>,
}

impl<V> DashMapBackend<V> {
    /// Creates a new empty DashMapBackend.
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Creates a new DashMapBackend with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: DashMap::with_capacity(capacity),
        }
    }
}

impl<V> Default for DashMapBackend<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Backend<V> for DashMapBackend<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &CacheKey) -> Option<V> {
        self.data.get(key).map(|entry| entry.value().clone())
    }

    fn contains(&self, key: &CacheKey) -> bool {
        self.data.contains_key(key)
    }

    fn insert_if_absent(&self, key: CacheKey, value: V) -> V {
        self.data.entry(key).or_insert(value).value().clone()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn clear(&self) {
        self.data.clear();
    }
}

/// A backend using a single `RwLock<HashMap>`.
///
/// Simple and good for read-heavy workloads; every insert takes the write lock.
#[derive(Debug)]
pub struct RwLockHashMapBackend<V> {
    data: RwLock<HashMap<CacheKey, V>>,
}

impl<V> RwLockHashMapBackend<V> {
    /// Creates a new empty RwLockHashMapBackend.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a new RwLockHashMapBackend with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }
}

impl<V> Default for RwLockHashMapBackend<V> {
    fn default() -> Self {
        Self::new()
    }
}

// The map is only mutated by single HashMap calls, so a poisoned lock still
// guards a consistent map.
impl<V> Backend<V> for RwLockHashMapBackend<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &CacheKey) -> Option<V> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn contains(&self, key: &CacheKey) -> bool {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    fn insert_if_absent(&self, key: CacheKey, value: V) -> V {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(value)
            .clone()
    }

    fn len(&self) -> usize {
        self.data.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn clear(&self) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Lets the backend be chosen at runtime.
impl<V> Backend<V> for Box<dyn Backend<V>> {
    fn get(&self, key: &CacheKey) -> Option<V> {
        (**self).get(key)
    }

    fn contains(&self, key: &CacheKey) -> bool {
        (**self).contains(key)
    }

    fn insert_if_absent(&self, key: CacheKey, value: V) -> V {
        (**self).insert_if_absent(key, value)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&self) {
        (**self).clear()
    }
}
