//! Counted retry loop shared by every attempt of the winners CLI.

use anyhow::{anyhow, Result};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::task::yield_now;
use tokio::time::sleep;

/// Upper bound on attempts plus the pause taken between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Attempt counter owned by a single retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptState {
    current: usize,
    max: usize,
}

impl AttemptState {
    pub fn new(max: usize) -> Self {
        Self { current: 0, max }
    }

    /// Moves to the next attempt, or returns `None` once the ceiling is hit.
    pub fn advance(&mut self) -> Option<usize> {
        if self.current >= self.max {
            return None;
        }
        self.current += 1;
        Some(self.current)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_last(&self) -> bool {
        self.current >= self.max
    }
}

/// Every attempt failed.
#[derive(Debug)]
pub struct RetriesExhausted {
    pub attempts: usize,
    pub last_error: String,
}

impl fmt::Display for RetriesExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exceeded maximum retries ({}); last error: {}",
            self.attempts, self.last_error
        )
    }
}

impl std::error::Error for RetriesExhausted {}

/// Runs `operation` until it succeeds or `policy.max_attempts` attempts have
/// failed. Every error takes the same path; `on_failure` sees the attempt
/// number, the error, and whether another attempt will follow.
pub async fn retry_with_delay<T, F, Fut, L>(
    policy: RetryPolicy,
    mut operation: F,
    mut on_failure: L,
) -> Result<T>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T>>,
    L: FnMut(usize, &anyhow::Error, bool),
{
    let mut state = AttemptState::new(policy.max_attempts);
    let mut last_error: Option<anyhow::Error> = None;

    while let Some(attempt) = state.advance() {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let will_retry = !state.is_last();
                on_failure(attempt, &err, will_retry);
                last_error = Some(err);
                if will_retry {
                    pause(policy.delay).await;
                }
            }
        }
    }

    let last_error = last_error
        .map(|err| format!("{err:#}"))
        .unwrap_or_else(|| "no attempts were made".to_owned());
    Err(anyhow!(RetriesExhausted {
        attempts: state.current(),
        last_error,
    }))
}

async fn pause(delay: Duration) {
    if delay.is_zero() {
        yield_now().await;
    } else {
        sleep(delay).await;
    }
}
