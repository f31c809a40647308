use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

#[derive(Debug, Clone, Copy)]
pub(super) struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

/// How a single attempt failed: transient failures are retried, fatal ones
/// short-circuit the loop.
#[derive(Debug)]
pub(super) enum AttemptError<E> {
    Transient(E),
    Fatal(E),
}

#[derive(Debug)]
pub(super) enum RetryError<E> {
    Fatal(E),
    Exhausted { attempts: u32, last: E },
}

/// Bounded-attempt loop with doubling backoff. Replaces open-ended
/// retry-until-success with a typed outcome the caller can report.
pub(super) async fn run_with_retry<T, E, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    E: Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AttemptError<E>>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut backoff = policy.initial_backoff;

    for attempt in 1..attempts {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(AttemptError::Fatal(error)) => return Err(RetryError::Fatal(error)),
            Err(AttemptError::Transient(error)) => {
                log::warn!(
                    "retry_attempt_failed attempt={} max_attempts={} backoff_ms={} error={}",
                    attempt,
                    attempts,
                    backoff.as_millis(),
                    error
                );
                sleep(backoff).await;
                backoff = backoff.saturating_mul(2);
            }
        }
    }

    match operation(attempts).await {
        Ok(value) => Ok(value),
        Err(AttemptError::Fatal(error)) => Err(RetryError::Fatal(error)),
        Err(AttemptError::Transient(error)) => {
            log::error!(
                "retry_attempts_exhausted attempts={} error={}",
                attempts,
                error
            );
            Err(RetryError::Exhausted {
                attempts,
                last: error,
            })
        }
    }
}
