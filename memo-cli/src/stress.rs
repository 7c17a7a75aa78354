//! Concurrent callers against a single key

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use memo_cache::{Lookup, MemoError, max_adjacent_product};
use rayon::prelude::*;
use tracing::info;

use crate::config::AdjacentCache;
use crate::error::CliError;

/// Outcome of a stress run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressReport {
    /// Number of concurrent callers
    pub callers: usize,
    /// Callers answered from the cache
    pub hits: usize,
    /// Callers that stored the value
    pub misses: usize,
    /// Times the computation actually ran
    pub computations: usize,
    /// Number of different values handed back to callers
    pub distinct_values: usize,
    /// The value every caller should have seen
    pub value: i128,
    /// Wall-clock time of the run
    pub elapsed: Duration,
}

/// Run `callers` lookups of `sequence` concurrently on a pool of
/// `thread_count` threads.
pub fn run_stress(
    cache: &AdjacentCache,
    sequence: &[i64],
    callers: usize,
    thread_count: usize,
) -> Result<StressReport, CliError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|e| CliError::ThreadPool(e.to_string()))?;

    let computations = AtomicUsize::new(0);
    let start = Instant::now();

    let lookups: Vec<Lookup<i128>> = pool.install(|| {
        (0..callers)
            .into_par_iter()
            .map(|_| {
                cache.get_or_compute_with(sequence, |seq| {
                    computations.fetch_add(1, Ordering::SeqCst);
                    max_adjacent_product(seq)
                })
            })
            .collect::<Result<Vec<_>, MemoError>>()
    })?;

    let elapsed = start.elapsed();
    let hits = lookups.iter().filter(|l| l.was_hit()).count();
    let values: BTreeSet<i128> = lookups.iter().map(|l| l.value).collect();
    let value = values
        .first()
        .copied()
        .ok_or_else(|| CliError::Config("Stress test needs at least 1 caller".to_string()))?;

    let report = StressReport {
        callers,
        hits,
        misses: lookups.len() - hits,
        computations: computations.load(Ordering::SeqCst),
        distinct_values: values.len(),
        value,
        elapsed,
    };
    info!(
        callers = report.callers,
        computations = report.computations,
        distinct_values = report.distinct_values,
        "stress run finished"
    );
    Ok(report)
}
