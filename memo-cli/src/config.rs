//! Configuration resolution from CLI args

use crate::cli::{Args, BackendKind, Command};
use crate::error::CliError;
use memo_cache::{Backend, DashMapBackend, MaxAdjacentProduct, MemoCache, RwLockHashMapBackend};

/// The cache type used by every command
pub type AdjacentCache = MemoCache<MaxAdjacentProduct, Box<dyn Backend<i128>>>;

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Command to run
    pub command: Command,
    /// Number of threads for concurrent work
    pub thread_count: usize,
    /// Cache storage backend
    pub backend: BackendKind,
    /// Separator between sequence elements
    pub delimiter: char,
    /// Quiet mode
    pub quiet: bool,
    /// Default log level when RUST_LOG is unset
    pub log_level: &'static str,
}

impl Config {
    /// Build config from CLI args
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let thread_count = match args.threads {
            Some(0) => {
                return Err(CliError::Config(
                    "Thread count must be at least 1".to_string(),
                ));
            }
            Some(n) => n,
            None => num_cpus(),
        };

        if args.delimiter.is_ascii_digit() || args.delimiter == '-' || args.delimiter == '+' {
            return Err(CliError::Config(format!(
                "Delimiter '{}' would be ambiguous with numbers",
                args.delimiter
            )));
        }

        if let Command::Stress { callers: 0, .. } = args.command {
            return Err(CliError::Config(
                "Stress test needs at least 1 caller".to_string(),
            ));
        }

        Ok(Config {
            command: args.command,
            thread_count,
            backend: args.backend,
            delimiter: args.delimiter,
            quiet: args.quiet,
            log_level: log_level(args.verbose),
        })
    }

    /// Construct an empty cache with the configured backend
    pub fn build_cache(&self) -> AdjacentCache {
        let backend: Box<dyn Backend<i128>> = match self.backend {
            BackendKind::Dashmap => Box::new(DashMapBackend::<i128>::new()),
            BackendKind::Rwlock => Box::new(RwLockHashMapBackend::<i128>::new()),
        };
        MemoCache::builder()
            .backend(backend)
            .computation(MaxAdjacentProduct)
            .build()
    }
}

/// Map `-v` occurrences to a tracing level
fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
