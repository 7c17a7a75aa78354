//! Thread-safe memoization cache with per-key single-flight computation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use dashmap::DashMap;
use tracing::{debug, info, trace, warn};

use crate::adjacent::MaxAdjacentProduct;
use crate::backend::{Backend, DashMapBackend};
use crate::computation::{Computation, ParallelComputation};
use crate::error::MemoError;
use crate::key::CacheKey;

/// Whether a lookup was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheStatus {
    /// The value was already stored
    Hit,
    /// The value was computed and stored by this call
    Miss,
}

impl CacheStatus {
    /// Lowercase label for display.
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
        }
    }
}

/// A value returned by the cache together with its hit/miss status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup<V> {
    pub value: V,
    pub status: CacheStatus,
}

impl<V> Lookup<V> {
    fn hit(value: V) -> Self {
        Self {
            value,
            status: CacheStatus::Hit,
        }
    }

    fn miss(value: V) -> Self {
        Self {
            value,
            status: CacheStatus::Miss,
        }
    }

    /// True if the value came from the cache.
    pub fn was_hit(&self) -> bool {
        self.status == CacheStatus::Hit
    }
}

/// Point-in-time counters for a cache. Reset by [`MemoCache::clear`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a stored entry
    pub hits: u64,
    /// Lookups that stored a freshly computed entry
    pub misses: u64,
    /// Times the computation ran, successful or not
    pub computations: u64,
    /// Computations that returned an error
    pub failures: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    computations: AtomicU64,
    failures: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            computations: self.computations.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.computations.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
    }
}

/// A memoization cache for a pure function over integer sequences.
///
/// Each distinct sequence is computed at most once, even when many threads ask
/// for it at the same time: writers for one key are serialized by a lock that
/// belongs to that key alone, and every caller converges on the first stored
/// value. Writers for different keys never wait on each other.
///
/// # Type Parameters
///
/// - `P`: Computation type (must implement `ParallelComputation` with a
///   `Clone + Send + Sync` output)
/// - `B`: Backend storage type (must implement `Backend<P::Output>`)
///
/// # Lifecycle
///
/// Build a cache with [`MemoCache::builder`], [`MemoCache::from_computation`]
/// or [`MemoCache::new`] for the adjacent-product default, share it by
/// reference or behind an `Arc`, call [`clear`](Self::clear) as needed, and
/// drop it when done.
///
/// # Clearing
///
/// `clear` waits for every in-flight writer to finish storing its entry and
/// then removes all entries and all per-key locks. An entry computed by a
/// writer that started before the clear therefore never reappears after it.
/// Writers only ever take the drain gate in shared mode, so writers for
/// different keys never wait on each other there; only a pending `clear`
/// holds them back.
///
/// # Warning: No Re-entrance
///
/// A computation must not call back into the same cache. A re-entrant call
/// for the same key deadlocks on that key's lock, and any re-entrant writer
/// can deadlock against a concurrent `clear`.
///
/// # Example
///
/// ```rust
/// use memo_cache::{CacheStatus, MemoCache};
///
/// let cache = MemoCache::new();
///
/// let first = cache.get_or_compute(&[3, 6, -2, -5, 7, 3]).unwrap();
/// assert_eq!(first.value, 21);
/// assert_eq!(first.status, CacheStatus::Miss);
///
/// let second = cache.get_or_compute(&[3, 6, -2, -5, 7, 3]).unwrap();
/// assert!(second.was_hit());
/// assert_eq!(cache.size(), 1);
/// ```
pub struct MemoCache<P = MaxAdjacentProduct, B = DashMapBackend<<P as Computation>::Output>>
where
    P: Computation,
    B: Backend<P::Output>,
{
    backend: B,
    computation: P,
    /// Per-key writer locks; an entry exists only while its key may still be
    /// computed.
    locks: DashMap<CacheKey, Arc<Mutex<()>>>,
    /// Writers hold this shared while computing and storing; `clear` holds it
    /// exclusively.
    drain: RwLock<()>,
    counters: Counters,
}

impl MemoCache {
    /// Creates a DashMap-backed cache for the maximum adjacent-pair product.
    pub fn new() -> Self {
        Self::from_computation(MaxAdjacentProduct)
    }

    /// Starts building a cache.
    pub fn builder() -> MemoCacheBuilder<Unset, Unset> {
        MemoCacheBuilder {
            backend: Unset,
            computation: Unset,
        }
    }
}

impl Default for MemoCache {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> MemoCache<P>
where
    P: ParallelComputation,
    P::Output: Clone + Send + Sync,
{
    /// Creates a DashMap-backed cache for the given computation.
    pub fn from_computation(computation: P) -> Self {
        Self::with_backend(DashMapBackend::new(), computation)
    }
}

impl<P, B> MemoCache<P, B>
where
    P: ParallelComputation,
    P::Output: Clone + Send + Sync,
    B: Backend<P::Output>,
{
    /// Creates a new MemoCache with the given backend and computation.
    pub fn with_backend(backend: B, computation: P) -> Self {
        Self {
            backend,
            computation,
            locks: DashMap::new(),
            drain: RwLock::new(()),
            counters: Counters::default(),
        }
    }

    /// True if a value is stored for `sequence`.
    pub fn has(&self, sequence: &[i64]) -> bool {
        self.backend.contains(&CacheKey::from_sequence(sequence))
    }

    /// Returns a copy of the value stored for `sequence`, if any.
    pub fn get(&self, sequence: &[i64]) -> Option<P::Output> {
        self.backend.get(&CacheKey::from_sequence(sequence))
    }

    /// Returns the stored value for `sequence`, computing it with the cache's
    /// computation if necessary.
    pub fn get_or_compute(&self, sequence: &[i64]) -> Result<Lookup<P::Output>, MemoError> {
        self.get_or_compute_with(sequence, |seq| self.computation.compute(seq))
    }

    /// Returns the stored value for `sequence`, computing it with `compute`
    /// if necessary.
    ///
    /// `compute` runs at most once per key across all concurrent callers. If
    /// it fails, the error is returned unchanged, nothing is stored, and a
    /// later call for the same key computes again.
    pub fn get_or_compute_with<F>(
        &self,
        sequence: &[i64],
        compute: F,
    ) -> Result<Lookup<P::Output>, MemoError>
    where
        F: FnOnce(&[i64]) -> Result<P::Output, MemoError>,
    {
        let key = CacheKey::from_sequence(sequence);

        // Fast path: check if already computed
        if let Some(value) = self.backend.get(&key) {
            trace!(%key, "cache hit");
            Counters::bump(&self.counters.hits);
            return Ok(Lookup::hit(value));
        }

        let _drain = self.drain.read().unwrap_or_else(PoisonError::into_inner);

        // Clone the Arc out so the registry shard is released before blocking
        let key_lock = self
            .locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();
        // The lock guards no data, so poisoning from a panicking computation is harmless
        let _guard = key_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // Another writer may have finished while we waited
        if let Some(value) = self.backend.get(&key) {
            trace!(%key, "cache hit after waiting for writer");
            Counters::bump(&self.counters.hits);
            return Ok(Lookup::hit(value));
        }

        debug!(%key, "cache miss, computing");
        Counters::bump(&self.counters.computations);
        match compute(sequence) {
            Ok(value) => {
                let value = self.backend.insert_if_absent(key.clone(), value);
                // Later writers re-check the backend under a lock, so the
                // key's lock is not needed once the entry exists
                self.locks.remove(&key);
                Counters::bump(&self.counters.misses);
                Ok(Lookup::miss(value))
            }
            Err(e) => {
                if e.is_invalid_input() {
                    debug!(%key, error = %e, "input rejected, nothing stored");
                } else {
                    warn!(%key, error = %e, "computation failed, nothing stored");
                }
                // Drop the key's lock unless a waiter already holds a clone.
                // Waiters clone it under the registry shard lock, so the count
                // cannot change while this check runs.
                self.locks.remove_if(&key, |_, lock| Arc::strong_count(lock) == 2);
                Counters::bump(&self.counters.failures);
                Err(e)
            }
        }
    }

    /// Removes every entry and every per-key lock.
    ///
    /// Blocks until all in-flight writers have finished.
    pub fn clear(&self) {
        let _drain = self.drain.write().unwrap_or_else(PoisonError::into_inner);
        let removed = self.backend.len();
        self.backend.clear();
        self.locks.clear();
        self.counters.reset();
        info!(removed, "cache cleared");
    }

    /// Number of stored entries at the time of the call.
    pub fn size(&self) -> usize {
        self.backend.len()
    }

    /// Alias for [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.size()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// Snapshot of the hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }

    /// The storage backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of keys with a registered writer lock.
    #[cfg(test)]
    pub(crate) fn pending_locks(&self) -> usize {
        self.locks.len()
    }
}

impl<P, B> std::fmt::Debug for MemoCache<P, B>
where
    P: Computation,
    B: Backend<P::Output>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoCache")
            .field("size", &self.backend.len())
            .field("pending_locks", &self.locks.len())
            .field("stats", &self.counters.snapshot())
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Marker for a builder slot that has not been set yet.
#[derive(Debug, Clone, Copy)]
pub struct Unset;

/// Builder for [`MemoCache`]. Both the backend and the computation must be set.
///
/// ```rust
/// use memo_cache::{MaxAdjacentProduct, MemoCache, RwLockHashMapBackend};
///
/// let cache = MemoCache::builder()
///     .backend(RwLockHashMapBackend::new())
///     .computation(MaxAdjacentProduct)
///     .build();
/// assert_eq!(cache.get_or_compute(&[-4, -9]).unwrap().value, 36);
/// ```
#[derive(Debug)]
pub struct MemoCacheBuilder<B, P> {
    backend: B,
    computation: P,
}

impl<B, P> MemoCacheBuilder<B, P> {
    /// Sets the storage backend.
    pub fn backend<B2>(self, backend: B2) -> MemoCacheBuilder<B2, P> {
        MemoCacheBuilder {
            backend,
            computation: self.computation,
        }
    }

    /// Sets the memoized computation.
    pub fn computation<P2>(self, computation: P2) -> MemoCacheBuilder<B, P2> {
        MemoCacheBuilder {
            backend: self.backend,
            computation,
        }
    }
}

impl<B, P> MemoCacheBuilder<B, P>
where
    P: ParallelComputation,
    P::Output: Clone + Send + Sync,
    B: Backend<P::Output>,
{
    /// Builds the cache.
    pub fn build(self) -> MemoCache<P, B> {
        MemoCache::with_backend(self.backend, self.computation)
    }
}
