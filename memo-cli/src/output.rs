//! Output formatting for lookups, cache state and stress reports

use memo_cache::{CacheStats, Lookup};
use std::time::Duration;

use crate::stress::StressReport;

/// Output formatter for cache results
pub struct OutputFormatter {
    quiet: bool,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// True if only bare values are printed
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Format a successful lookup together with the cache size after it
    pub fn lookup(&self, sequence: &[i64], lookup: &Lookup<i128>, size: usize) -> String {
        if self.quiet {
            return lookup.value.to_string();
        }

        let origin = if lookup.was_hit() {
            "hit, served from cache"
        } else {
            "miss, computed and stored"
        };
        format!(
            "{}: {} ({}; cache size: {})",
            format_sequence(sequence),
            lookup.value,
            origin,
            size
        )
    }

    /// Format a rejected input or failed computation
    pub fn error(&self, input: &str, error: &impl std::fmt::Display) -> String {
        if self.quiet {
            format!("Error: {}", error)
        } else {
            format!("{:?}: Error - {}", input.trim(), error)
        }
    }

    /// Format the cache size
    pub fn size(&self, size: usize) -> String {
        if self.quiet {
            size.to_string()
        } else {
            format!("Cache size: {} {}", size, plural(size, "entry", "entries"))
        }
    }

    /// Format the hit/miss counters
    pub fn stats(&self, size: usize, stats: &CacheStats) -> String {
        if self.quiet {
            return format!(
                "{} {} {} {}",
                stats.hits, stats.misses, stats.computations, stats.failures
            );
        }
        format!(
            "Cache size: {}, hits: {}, misses: {}, computations: {}, failures: {}",
            size, stats.hits, stats.misses, stats.computations, stats.failures
        )
    }

    /// Format the outcome of a clear
    pub fn cleared(&self, removed: usize) -> String {
        if self.quiet {
            "0".to_string()
        } else {
            format!(
                "Cache cleared ({} {} removed)",
                removed,
                plural(removed, "entry", "entries")
            )
        }
    }

    /// Format a stress run
    pub fn stress(&self, report: &StressReport) -> String {
        if self.quiet {
            return report.value.to_string();
        }

        let mut lines = vec![
            format!("Value: {}", report.value),
            format!(
                "Callers: {} ({} hits, {} misses)",
                report.callers, report.hits, report.misses
            ),
            format!("Computations performed: {}", report.computations),
            format!("Distinct values observed: {}", report.distinct_values),
            format!("Elapsed wall-clock time: {}", format_std_duration(report.elapsed)),
        ];
        if report.computations != 1 || report.distinct_values != 1 {
            lines.push("Warning: single-flight guarantee violated".to_string());
        }
        lines.join("\n")
    }
}

/// Format a sequence the way it is echoed back to the user
pub fn format_sequence(sequence: &[i64]) -> String {
    let parts: Vec<String> = sequence.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memo_cache::MemoCache;

    #[test]
    fn test_lookup_miss_then_hit() {
        let cache = MemoCache::new();
        let formatter = OutputFormatter::new(false);
        let seq = [3, 6, -2, -5, 7, 3];

        let miss = cache.get_or_compute(&seq).unwrap();
        assert_eq!(
            formatter.lookup(&seq, &miss, cache.size()),
            "[3, 6, -2, -5, 7, 3]: 21 (miss, computed and stored; cache size: 1)"
        );

        let hit = cache.get_or_compute(&seq).unwrap();
        assert_eq!(
            formatter.lookup(&seq, &hit, cache.size()),
            "[3, 6, -2, -5, 7, 3]: 21 (hit, served from cache; cache size: 1)"
        );
    }

    #[test]
    fn test_quiet_output() {
        let cache = MemoCache::new();
        let formatter = OutputFormatter::new(true);
        let lookup = cache.get_or_compute(&[-4, -9]).unwrap();
        assert_eq!(formatter.lookup(&[-4, -9], &lookup, 1), "36");
        assert_eq!(formatter.size(3), "3");
    }

    #[test]
    fn test_size_pluralization() {
        let formatter = OutputFormatter::new(false);
        assert_eq!(formatter.size(1), "Cache size: 1 entry");
        assert_eq!(formatter.size(0), "Cache size: 0 entries");
        assert_eq!(formatter.cleared(2), "Cache cleared (2 entries removed)");
    }

    #[test]
    fn test_format_std_duration() {
        assert_eq!(format_std_duration(Duration::from_micros(250)), "250µs");
        assert_eq!(format_std_duration(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(format_std_duration(Duration::from_millis(2500)), "2.50s");
    }
}
