//! Bounded readiness wait: polls a search until a document becomes the top hit.

use std::time::{Duration, Instant};

use docindex_common::Result;
use docindex_text_index::SearchHit;

/// How often and how long to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Pause between two attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 50,
            delay: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOutcome {
    pub found: bool,
    pub attempts: u32,
    pub elapsed: Duration,
}

/// Calls `search` until its top hit is `expected_ref` or the policy's attempts
/// run out.
///
/// A `NotFound` error (index not built yet) counts as a failed attempt; any
/// other error ends the wait.
pub fn wait_until_searchable<F>(
    mut search: F,
    expected_ref: &str,
    policy: &RetryPolicy,
) -> Result<WaitOutcome>
where
    F: FnMut() -> Result<Vec<SearchHit>>,
{
    let start = Instant::now();
    let mut attempts = 0;
    while attempts < policy.max_attempts {
        if attempts > 0 && !policy.delay.is_zero() {
            std::thread::sleep(policy.delay);
        }
        attempts += 1;
        let found = match search() {
            Ok(hits) => hits.first().is_some_and(|hit| hit.doc_ref == expected_ref),
            Err(e) if e.is_not_found() => false,
            Err(e) => return Err(e),
        };
        if found {
            return Ok(WaitOutcome {
                found: true,
                attempts,
                elapsed: start.elapsed(),
            });
        }
    }
    log::warn!("'{expected_ref}' not searchable after {attempts} attempt(s)");
    Ok(WaitOutcome {
        found: false,
        attempts,
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use docindex_common::error::Error;

    use super::*;

    fn immediate(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_found_after_retries() {
        let mut calls = 0;
        let outcome = wait_until_searchable(
            || {
                calls += 1;
                match calls {
                    1 => Err(Error::not_found("index 'movies'")),
                    2 => Ok(vec![SearchHit::new("other", 100.0)]),
                    _ => Ok(vec![SearchHit::new("x7Gq2LmP", 115.0)]),
                }
            },
            "x7Gq2LmP",
            &immediate(10),
        )
        .unwrap();
        assert!(outcome.found);
        assert_eq!(outcome.attempts, 3);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let mut calls = 0;
        let outcome = wait_until_searchable(
            || {
                calls += 1;
                Ok(Vec::new())
            },
            "missing",
            &immediate(7),
        )
        .unwrap();
        assert!(!outcome.found);
        assert_eq!(outcome.attempts, 7);
        assert_eq!(calls, 7);
    }

    #[test]
    fn test_hard_errors_end_the_wait() {
        let result = wait_until_searchable(
            || Err(Error::invalid_arg("index", "bad name")),
            "x",
            &immediate(5),
        );
        assert!(result.is_err());

        let outcome = wait_until_searchable(|| Ok(Vec::new()), "x", &immediate(0)).unwrap();
        assert_eq!(outcome.attempts, 0);
    }
}
