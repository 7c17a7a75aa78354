//! Interactive session: one cache, many sequences

use std::io::{BufRead, Write};

use tracing::debug;

use crate::config::AdjacentCache;
use crate::error::CliError;
use crate::input::{DEFAULT_INPUT, parse_sequence};
use crate::output::OutputFormatter;

const HELP: &str = "Enter a sequence (e.g. 3, 6, -2, -5, 7, 3); an empty line uses the example.
Commands: :size, :stats, :clear, :help, :quit";

/// A line of session input
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionLine<'a> {
    Sequence(&'a str),
    Size,
    Stats,
    Clear,
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> SessionLine<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        match line {
            "" => SessionLine::Sequence(DEFAULT_INPUT),
            ":size" => SessionLine::Size,
            ":stats" => SessionLine::Stats,
            ":clear" => SessionLine::Clear,
            ":help" | ":h" | "?" => SessionLine::Help,
            ":quit" | ":q" | ":exit" => SessionLine::Quit,
            cmd if cmd.starts_with(':') => SessionLine::Unknown(cmd),
            seq => SessionLine::Sequence(seq),
        }
    }
}

/// Run a session until `:quit` or end of input.
///
/// Rejected input is reported on `output` and the session continues; only IO
/// failures end it early.
pub fn run_session<R, W>(
    cache: &AdjacentCache,
    delimiter: char,
    formatter: &OutputFormatter,
    input: R,
    mut output: W,
) -> Result<(), CliError>
where
    R: BufRead,
    W: Write,
{
    if !formatter.is_quiet() {
        writeln!(output, "{}", HELP)?;
    }

    for line in input.lines() {
        let line = line?;
        match SessionLine::parse(&line) {
            SessionLine::Sequence(text) => {
                let result = parse_sequence(text, delimiter)
                    .and_then(|seq| cache.get_or_compute(&seq).map(|lookup| (seq, lookup)));
                match result {
                    Ok((seq, lookup)) => {
                        writeln!(output, "{}", formatter.lookup(&seq, &lookup, cache.size()))?
                    }
                    Err(e) => {
                        debug!(input = text, error = %e, "rejected session input");
                        writeln!(output, "{}", formatter.error(text, &e))?
                    }
                }
            }
            SessionLine::Size => writeln!(output, "{}", formatter.size(cache.size()))?,
            SessionLine::Stats => {
                writeln!(output, "{}", formatter.stats(cache.size(), &cache.stats()))?
            }
            SessionLine::Clear => {
                let removed = cache.size();
                cache.clear();
                writeln!(output, "{}", formatter.cleared(removed))?
            }
            SessionLine::Help => writeln!(output, "{}", HELP)?,
            SessionLine::Quit => break,
            SessionLine::Unknown(cmd) => {
                writeln!(output, "Unknown command {}; try :help", cmd)?
            }
        }
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use memo_cache::{Backend, DashMapBackend, MaxAdjacentProduct, MemoCache};

    fn session(script: &str, quiet: bool) -> (String, AdjacentCache) {
        let backend: Box<dyn Backend<i128>> = Box::new(DashMapBackend::<i128>::new());
        let cache = MemoCache::with_backend(backend, MaxAdjacentProduct);
        let mut out = Vec::new();
        run_session(
            &cache,
            ',',
            &OutputFormatter::new(quiet),
            script.as_bytes(),
            &mut out,
        )
        .unwrap();
        (String::from_utf8(out).unwrap(), cache)
    }

    #[test]
    fn test_line_parsing() {
        assert_eq!(SessionLine::parse("  "), SessionLine::Sequence(DEFAULT_INPUT));
        assert_eq!(SessionLine::parse(" 1,2 "), SessionLine::Sequence("1,2"));
        assert_eq!(SessionLine::parse(":q"), SessionLine::Quit);
        assert_eq!(SessionLine::parse(":nope"), SessionLine::Unknown(":nope"));
    }

    #[test]
    fn test_miss_hit_and_size() {
        let (out, cache) = session("3, 6, -2, -5, 7, 3\n\n:size\n", true);
        assert_eq!(out, "21\n21\n1\n");
        assert_eq!(cache.size(), 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_invalid_input_keeps_session_alive() {
        let (out, cache) = session("5\n3, x\n-4, -9\n", true);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Error: Invalid input"));
        assert!(lines[1].contains("'x'"));
        assert_eq!(lines[2], "36");
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_clear_and_quit() {
        let (out, cache) = session("1,2\n2,3\n:clear\n:size\n:quit\n4,5\n", false);
        assert!(out.contains("Cache cleared (2 entries removed)"));
        assert!(out.contains("Cache size: 0 entries"));
        // Nothing after :quit is evaluated
        assert!(!out.contains("[4, 5]"));
        assert!(cache.is_empty());
    }
}
