//! adjacent - command-line front end for the adjacent-product memoization cache

mod cli;
mod config;
mod error;
mod eval;
mod input;
mod output;
mod session;
mod stress;

use clap::Parser;
use cli::{Args, Command};
use config::Config;
use error::CliError;
use input::parse_sequence;
use output::OutputFormatter;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    init_tracing(config.log_level);

    let cache = config.build_cache();
    info!(
        backend = ?config.backend,
        threads = config.thread_count,
        "cache session started"
    );
    let formatter = OutputFormatter::new(config.quiet);

    match &config.command {
        Command::Eval { inputs } => eval::run_eval(
            &cache,
            config.delimiter,
            &formatter,
            inputs,
            std::io::stdout(),
            std::io::stderr(),
        ),
        Command::Session => {
            let stdin = std::io::stdin();
            session::run_session(
                &cache,
                config.delimiter,
                &formatter,
                stdin.lock(),
                std::io::stdout(),
            )
        }
        Command::Stress { input, callers } => {
            let sequence = parse_sequence(input, config.delimiter)?;
            let report = stress::run_stress(&cache, &sequence, *callers, config.thread_count)?;
            println!("{}", formatter.stress(&report));
            Ok(())
        }
    }
}

/// Install the fmt subscriber on stderr; RUST_LOG takes precedence over `-v`
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "memo_cache={level},adjacent={level}",
            level = default_level
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
