//! Benchmark comparing cache backends on the adjacent-product computation.
//!
//! Run with: cargo run --example backend_benchmark --release
//!
//! Generates random sequences with many repeats and looks each one up:
//! - DashMapBackend, sequential
//! - DashMapBackend, parallel with Rayon
//! - RwLockHashMapBackend, parallel with Rayon

use memo_cache::{DashMapBackend, MaxAdjacentProduct, MemoCache, RwLockHashMapBackend};
use rayon::prelude::*;
use std::time::Instant;

const NUM_LOOKUPS: usize = 200_000;
const DISTINCT_SEQUENCES: u64 = 5_000;
const SEQUENCE_LEN: usize = 64;

/// Simple LCG random number generator for reproducibility
fn lcg(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    *state
}

/// Build `count` lookups drawn from a fixed pool of distinct sequences
fn generate_inputs(seed: u64, count: usize) -> Vec<Vec<i64>> {
    let mut rng = seed;
    (0..count)
        .map(|_| {
            let mut seq_rng = lcg(&mut rng) % DISTINCT_SEQUENCES;
            (0..SEQUENCE_LEN)
                .map(|_| (lcg(&mut seq_rng) % 2001) as i64 - 1000)
                .collect()
        })
        .collect()
}

fn main() {
    println!("Adjacent Product Cache Benchmark");
    println!("================================");
    println!(
        "{} lookups over {} distinct sequences of length {}\n",
        NUM_LOOKUPS, DISTINCT_SEQUENCES, SEQUENCE_LEN
    );

    let inputs = generate_inputs(42, NUM_LOOKUPS);

    // 1. DashMapBackend, sequential
    let start = Instant::now();
    let sequential = MemoCache::new();
    let sequential_results: Vec<i128> = inputs
        .iter()
        .map(|seq| sequential.get_or_compute(seq).unwrap().value)
        .collect();
    let sequential_time = start.elapsed();
    println!("DashMapBackend (sequential):     {:?}", sequential_time);

    // 2. DashMapBackend, parallel
    let start = Instant::now();
    let dashmap = MemoCache::builder()
        .backend(DashMapBackend::new())
        .computation(MaxAdjacentProduct)
        .build();
    let dashmap_results: Vec<i128> = inputs
        .par_iter()
        .map(|seq| dashmap.get_or_compute(seq).unwrap().value)
        .collect();
    let dashmap_time = start.elapsed();
    println!("DashMapBackend (parallel):       {:?}", dashmap_time);

    // 3. RwLockHashMapBackend, parallel
    let start = Instant::now();
    let rwlock = MemoCache::builder()
        .backend(RwLockHashMapBackend::new())
        .computation(MaxAdjacentProduct)
        .build();
    let rwlock_results: Vec<i128> = inputs
        .par_iter()
        .map(|seq| rwlock.get_or_compute(seq).unwrap().value)
        .collect();
    let rwlock_time = start.elapsed();
    println!("RwLockHashMapBackend (parallel): {:?}", rwlock_time);

    assert_eq!(sequential_results, dashmap_results, "DashMap results mismatch");
    assert_eq!(sequential_results, rwlock_results, "RwLock results mismatch");
    println!("\n✓ All backends agree");

    for (name, cache_stats, size) in [
        ("sequential", sequential.stats(), sequential.size()),
        ("dashmap", dashmap.stats(), dashmap.size()),
        ("rwlock", rwlock.stats(), rwlock.size()),
    ] {
        println!(
            "{:<10} entries: {:>5}, hits: {:>7}, computations: {:>5}",
            name, size, cache_stats.hits, cache_stats.computations
        );
    }
}
