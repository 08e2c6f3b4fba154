// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Activity executor
//!
//! Runs a named side effect under a retry policy: every attempt is bounded by
//! the start-to-close timeout and failed attempts back off exponentially.

use crate::error::FlowError;
use sg_core::RetryPolicy;
use std::fmt::Display;
use std::future::Future;
use tracing::Instrument;

/// Execute `op` until it succeeds or the attempt budget is spent.
///
/// `op` receives the 1-based attempt number.
pub async fn execute<T, E, F, Fut>(
    activity: &str,
    policy: &RetryPolicy,
    op: F,
) -> Result<T, FlowError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    run(activity, policy, op, Exhaustion::Fatal).await
}

/// Like [`execute`], for callers that recover from exhaustion themselves.
/// Running out of attempts is logged at warn instead of error.
pub async fn execute_recoverable<T, E, F, Fut>(
    activity: &str,
    policy: &RetryPolicy,
    op: F,
) -> Result<T, FlowError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    run(activity, policy, op, Exhaustion::Recovered).await
}

#[derive(Clone, Copy)]
enum Exhaustion {
    Fatal,
    Recovered,
}

async fn run<T, E, F, Fut>(
    activity: &str,
    policy: &RetryPolicy,
    mut op: F,
    exhaustion: Exhaustion,
) -> Result<T, FlowError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let span = tracing::info_span!("activity", activity);
    let attempts = policy.attempts();

    async move {
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            let start = std::time::Instant::now();
            let outcome = tokio::time::timeout(policy.start_to_close, op(attempt)).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match outcome {
                Ok(Ok(value)) => {
                    tracing::debug!(attempt, elapsed_ms, "completed");
                    return Ok(value);
                }
                Ok(Err(e)) => last_error = e.to_string(),
                Err(_) => {
                    last_error = format!(
                        "attempt exceeded start-to-close timeout of {:?}",
                        policy.start_to_close
                    )
                }
            }

            if attempt < attempts {
                let delay = policy.backoff_for_attempt(attempt);
                tracing::warn!(
                    attempt,
                    elapsed_ms,
                    error = %last_error,
                    retry_in_ms = delay.as_millis() as u64,
                    "attempt failed"
                );
                tokio::time::sleep(delay).await;
            }
        }

        match exhaustion {
            Exhaustion::Fatal => {
                tracing::error!(attempts, error = %last_error, "retries exhausted")
            }
            Exhaustion::Recovered => {
                tracing::warn!(attempts, error = %last_error, "retries exhausted")
            }
        }
        Err(FlowError::ActivityFailed {
            activity: activity.to_string(),
            attempts,
            message: last_error,
        })
    }
    .instrument(span)
    .await
}

#[cfg(test)]
#[path = "activity_tests.rs"]
mod tests;
