//! One-shot evaluation of sequences given on the command line

use std::io::Write;

use tracing::debug;

use crate::config::AdjacentCache;
use crate::error::CliError;
use crate::input::parse_sequence;
use crate::output::OutputFormatter;

/// Evaluate every input in order against `cache`.
///
/// Results go to `out` and rejected inputs to `err`; evaluation continues past
/// a rejected input and the first rejection is returned at the end.
pub fn run_eval<O, E>(
    cache: &AdjacentCache,
    delimiter: char,
    formatter: &OutputFormatter,
    inputs: &[String],
    mut out: O,
    mut err: E,
) -> Result<(), CliError>
where
    O: Write,
    E: Write,
{
    let mut first_error = None;

    for input in inputs {
        let result = parse_sequence(input, delimiter)
            .and_then(|seq| cache.get_or_compute(&seq).map(|lookup| (seq, lookup)));
        match result {
            Ok((seq, lookup)) => {
                writeln!(out, "{}", formatter.lookup(&seq, &lookup, cache.size()))?
            }
            Err(e) => {
                debug!(input = %input, error = %e, "rejected eval input");
                writeln!(err, "{}", formatter.error(input, &e))?;
                first_error.get_or_insert(e);
            }
        }
    }

    out.flush()?;
    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memo_cache::{Backend, DashMapBackend, MaxAdjacentProduct, MemoCache, MemoError};

    fn cache() -> AdjacentCache {
        let backend: Box<dyn Backend<i128>> = Box::new(DashMapBackend::<i128>::new());
        MemoCache::with_backend(backend, MaxAdjacentProduct)
    }

    fn eval(cache: &AdjacentCache, inputs: &[&str]) -> (Result<(), CliError>, String, String) {
        let inputs: Vec<String> = inputs.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run_eval(
            cache,
            ',',
            &OutputFormatter::new(false),
            &inputs,
            &mut out,
            &mut err,
        );
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_repeated_input_is_a_hit() {
        let cache = cache();
        let (result, out, err) = eval(&cache, &["1,2", "1,2"]);

        assert!(result.is_ok());
        assert!(err.is_empty());
        assert_eq!(
            out,
            "[1, 2]: 2 (miss, computed and stored; cache size: 1)\n\
             [1, 2]: 2 (hit, served from cache; cache size: 1)\n"
        );
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_rejected_input_fails_after_reporting_the_rest() {
        let cache = cache();
        let (result, out, err) = eval(&cache, &["1,2", "5", "-4,-9"]);

        assert!(matches!(
            result,
            Err(CliError::Memo(MemoError::InvalidInput(_)))
        ));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[1, 2]: 2 (miss"));
        assert!(lines[1].starts_with("[-4, -9]: 36 (miss"));
        assert!(err.starts_with("\"5\": Error - Invalid input"));
        assert_eq!(err.lines().count(), 1);
    }

    #[test]
    fn test_size_reported_after_each_input() {
        let cache = cache();
        let (result, out, _) = eval(&cache, &["1,2", "2,3", "1,2", "3,4"]);

        assert!(result.is_ok());
        let sizes: Vec<&str> = out
            .lines()
            .filter_map(|line| line.rsplit("cache size: ").next())
            .map(|tail| tail.trim_end_matches(')'))
            .collect();
        assert_eq!(sizes, ["1", "2", "2", "3"]);
        assert_eq!(cache.size(), 3);
    }

    #[test]
    fn test_first_rejection_is_returned() {
        let cache = cache();
        let (result, _, err) = eval(&cache, &["x", "7"]);

        match result {
            Err(CliError::Memo(e)) => assert!(e.to_string().contains("'x'")),
            other => panic!("expected the parse error, got {:?}", other),
        }
        assert_eq!(err.lines().count(), 2);
    }
}
