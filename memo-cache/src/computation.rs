//! Trait-based definition of the function a cache memoizes.

use std::marker::PhantomData;

use crate::error::MemoError;

/// A pure, deterministic function over an integer sequence.
///
/// Implement this trait to plug a computation into a [`MemoCache`](crate::MemoCache).
/// The cache assumes referential transparency: identical sequences must always
/// produce identical values, since only the first result for a key is kept.
///
/// # Example
///
/// ```rust
/// use memo_cache::{Computation, MemoCache, MemoError};
///
/// struct Sum;
///
/// impl Computation for Sum {
///     type Output = i64;
///
///     fn compute(&self, sequence: &[i64]) -> Result<i64, MemoError> {
///         Ok(sequence.iter().sum())
///     }
/// }
///
/// let cache = MemoCache::from_computation(Sum);
/// assert_eq!(cache.get_or_compute(&[1, 2, 3]).unwrap().value, 6);
/// ```
pub trait Computation {
    /// The value stored in the cache for each sequence.
    type Output;

    /// Computes the value for `sequence`.
    ///
    /// Errors are forwarded unchanged to the caller of the cache and are
    /// never stored.
    fn compute(&self, sequence: &[i64]) -> Result<Self::Output, MemoError>;
}

/// Marker trait for computations that can be shared across threads.
pub trait ParallelComputation: Computation + Send + Sync {}

// Blanket implementation: any Computation that is Send + Sync is also ParallelComputation
impl<T> ParallelComputation for T where T: Computation + Send + Sync {}

/// Wrapper to adapt a closure to the [`Computation`] trait.
pub struct ClosureComputation<V, F>
where
    F: Fn(&[i64]) -> Result<V, MemoError>,
{
    compute_fn: F,
    _phantom: PhantomData<fn() -> V>,
}

impl<V, F> ClosureComputation<V, F>
where
    F: Fn(&[i64]) -> Result<V, MemoError>,
{
    /// Creates a computation from a closure.
    pub fn new(compute_fn: F) -> Self {
        Self {
            compute_fn,
            _phantom: PhantomData,
        }
    }
}

impl<V, F> Computation for ClosureComputation<V, F>
where
    F: Fn(&[i64]) -> Result<V, MemoError>,
{
    type Output = V;

    fn compute(&self, sequence: &[i64]) -> Result<V, MemoError> {
        (self.compute_fn)(sequence)
    }
}
