//! Memoization cache for pure functions over integer sequences
//!
//! This crate provides a thread-safe cache that computes each distinct input
//! sequence at most once, together with the computation it was built for: the
//! maximum product of two adjacent elements.
//!
//! # Overview
//!
//! - [`CacheKey`]: canonical, lossless byte encoding of a sequence
//! - [`Computation`]: the pure function a cache memoizes
//! - [`Backend`]: pluggable entry storage ([`DashMapBackend`], [`RwLockHashMapBackend`])
//! - [`MemoCache`]: the cache, with per-key single-flight writers
//!
//! # Quick Example
//!
//! ```
//! use memo_cache::{MemoCache, MemoError};
//!
//! let cache = MemoCache::new();
//!
//! let lookup = cache.get_or_compute(&[3, 6, -2, -5, 7, 3]).unwrap();
//! assert_eq!(lookup.value, 21);
//! assert!(!lookup.was_hit());
//! assert!(cache.get_or_compute(&[3, 6, -2, -5, 7, 3]).unwrap().was_hit());
//!
//! assert!(matches!(cache.get_or_compute(&[5]), Err(MemoError::InvalidInput(_))));
//! assert_eq!(cache.size(), 1);
//!
//! cache.clear();
//! assert!(cache.is_empty());
//! ```
//!
//! # Closure-based computations
//!
//! ```
//! use memo_cache::{ClosureComputation, MemoCache, MemoError};
//!
//! let span = ClosureComputation::new(|seq: &[i64]| -> Result<i64, MemoError> {
//!     let min = seq.iter().min().ok_or_else(|| MemoError::InvalidInput("empty".into()))?;
//!     let max = seq.iter().max().ok_or_else(|| MemoError::InvalidInput("empty".into()))?;
//!     Ok(max - min)
//! });
//!
//! let cache = MemoCache::from_computation(span);
//! assert_eq!(cache.get_or_compute(&[4, -1, 9]).unwrap().value, 10);
//! ```

mod adjacent;
mod backend;
mod cache;
mod computation;
mod error;
mod key;

pub use adjacent::{MaxAdjacentProduct, max_adjacent_product};
pub use backend::{Backend, DashMapBackend, RwLockHashMapBackend};
pub use cache::{CacheStats, CacheStatus, Lookup, MemoCache, MemoCacheBuilder, Unset};
pub use computation::{ClosureComputation, Computation, ParallelComputation};
pub use error::MemoError;
pub use key::CacheKey;
