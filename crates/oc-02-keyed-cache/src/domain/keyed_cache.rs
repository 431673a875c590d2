//! # Keyed Cache
//!
//! Write-through memoization of source lookups, keyed by an identifier.
//!
//! ## Policy
//!
//! - **Hit**: return a clone of the cached value, no freshness check.
//! - **Miss**: call the loader, store the result, return it. A failing
//!   loader caches nothing.
//! - **Refresh**: mutation paths overwrite the entry with a fresh value, or
//!   drop it when the source no longer has the entity.
//! - **Invalidate**: remove the entry; the next lookup repopulates.
//!
//! Entries carry no TTL or version. Staleness is corrected only by refresh,
//! invalidation or rebuild-on-empty.
//!
//! ## Locking
//!
//! [`KeyedCache`] is a plain map. [`SharedCache`] wraps it in a
//! `parking_lot::RwLock`: hits are served under the read lock, misses
//! re-check under the write lock before calling the loader, so concurrent
//! misses on one key reach the source once. Mutation paths take
//! [`SharedCache::write`] and hold it across "persist, then refresh".

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Counters reported by [`KeyedCache::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub fills: u64,
    pub invalidations: u64,
    pub entries: usize,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    fills: AtomicU64,
    invalidations: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Key to value map with write-through policy.
#[derive(Debug)]
pub struct KeyedCache<K, V> {
    name: &'static str,
    entries: BTreeMap<K, V>,
    counters: Counters,
}

impl<K, V> KeyedCache<K, V>
where
    K: Ord + Clone + std::fmt::Debug,
    V: Clone,
{
    /// Creates an empty cache labelled `name` in logs.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: BTreeMap::new(),
            counters: Counters::default(),
        }
    }

    /// Cached value for `key`, counting a hit when present.
    pub fn lookup(&self, key: &K) -> Option<V> {
        let value = self.entries.get(key).cloned();
        if value.is_some() {
            Counters::bump(&self.counters.hits);
            debug!(cache = self.name, key = ?key, "Cache hit");
        }
        value
    }

    /// Cached value for `key`, or the loader's value, which is then stored.
    pub fn get_or_load<E, F>(&mut self, key: K, loader: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if let Some(value) = self.lookup(&key) {
            return Ok(value);
        }

        Counters::bump(&self.counters.misses);
        debug!(cache = self.name, key = ?key, "Cache miss, loading from source");

        let value = loader(&key)?;
        self.fill(key, value.clone());
        Ok(value)
    }

    /// Overwrites the entry for `key`.
    pub fn put_or_refresh(&mut self, key: K, value: V) {
        self.fill(key, value);
    }

    /// Reloads `key` from the source. The entry is dropped when the loader
    /// reports the entity gone.
    pub fn refresh_with<E, F>(&mut self, key: K, loader: F) -> Result<Option<V>, E>
    where
        F: FnOnce(&K) -> Result<Option<V>, E>,
    {
        match loader(&key)? {
            Some(value) => {
                self.fill(key, value.clone());
                Ok(Some(value))
            }
            None => {
                self.invalidate(&key);
                Ok(None)
            }
        }
    }

    /// Mutable access to a present entry.
    pub fn entry_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Removes the entry for `key`. Returns whether one was present.
    pub fn invalidate(&mut self, key: &K) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            Counters::bump(&self.counters.invalidations);
            debug!(cache = self.name, key = ?key, "Cache entry invalidated");
        }
        removed
    }

    /// Ordered copy of every entry.
    pub fn snapshot_all(&self) -> BTreeMap<K, V> {
        self.entries.clone()
    }

    pub fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        debug!(cache = self.name, dropped, "Cache cleared");
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            fills: self.counters.fills.load(Ordering::Relaxed),
            invalidations: self.counters.invalidations.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    fn fill(&mut self, key: K, value: V) {
        Counters::bump(&self.counters.fills);
        self.entries.insert(key, value);
    }
}

/// [`KeyedCache`] behind a read/write lock, shared by a service.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: RwLock<KeyedCache<K, V>>,
}

impl<K, V> SharedCache<K, V>
where
    K: Ord + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: RwLock::new(KeyedCache::new(name)),
        }
    }

    /// Read-lock fast path, then a double-checked fill under the write lock.
    pub fn get_or_load<E, F>(&self, key: &K, loader: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if let Some(value) = self.inner.read().lookup(key) {
            return Ok(value);
        }
        self.inner.write().get_or_load(key.clone(), loader)
    }

    /// Exclusive access for mutation paths.
    pub fn write(&self) -> RwLockWriteGuard<'_, KeyedCache<K, V>> {
        self.inner.write()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, KeyedCache<K, V>> {
        self.inner.read()
    }

    pub fn invalidate(&self, key: &K) -> bool {
        self.inner.write().invalidate(key)
    }

    pub fn snapshot_all(&self) -> BTreeMap<K, V> {
        self.inner.read().snapshot_all()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.read().stats()
    }
}
