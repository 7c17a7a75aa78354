//! CLI argument parsing using clap

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Storage backend for the cache
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum BackendKind {
    /// Sharded concurrent map (default)
    #[default]
    Dashmap,
    /// Single RwLock around a HashMap
    Rwlock,
}

/// Maximum adjacent-pair product with a memoizing cache
#[derive(Parser, Debug)]
#[command(name = "adjacent", about = "Compute maximum adjacent-pair products through a memoizing cache", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Number of threads for concurrent work
    #[arg(long, global = true, env = "ADJACENT_THREADS")]
    pub threads: Option<usize>,

    /// Cache storage backend
    #[arg(long, global = true, value_enum, default_value = "dashmap")]
    pub backend: BackendKind,

    /// Separator between sequence elements
    #[arg(long, global = true, default_value = ",")]
    pub delimiter: char,

    /// Quiet mode - only output values
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Evaluate each sequence in order against one cache
    Eval {
        /// Delimited sequences, e.g. "3, 6, -2, -5, 7, 3"
        #[arg(required = true, allow_hyphen_values = true)]
        inputs: Vec<String>,
    },
    /// Read sequences from stdin until `:quit` or end of input
    Session,
    /// Hit one sequence from many concurrent callers
    Stress {
        /// Delimited sequence shared by every caller
        #[arg(allow_hyphen_values = true)]
        input: String,

        /// Number of concurrent callers
        #[arg(long, default_value_t = 64)]
        callers: usize,
    },
}
