// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Revocable gate timers
//!
//! A timer is an absolute deadline registered in the run's scheduler. Waiting
//! on it sleeps until the deadline and then claims the entry, so a timer that
//! was cancelled in the meantime never resolves.

use sg_core::{Clock, Scheduler, TimerId};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Longest deadline a gate timer is armed with (about 30 years)
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Timer scheduler of one run
#[derive(Clone)]
pub struct Timers<C: Clock> {
    scheduler: Arc<Mutex<Scheduler>>,
    clock: C,
}

impl<C: Clock> Timers<C> {
    pub fn new(clock: C) -> Self {
        Self {
            scheduler: Arc::new(Mutex::new(Scheduler::new())),
            clock,
        }
    }

    /// Arm a timer that fires `duration` from now.
    ///
    /// Durations beyond [`FAR_FUTURE`] are clamped to it.
    pub fn arm(&self, duration: Duration) -> Timer<C> {
        let now = self.clock.now();
        let deadline = match now.checked_add(duration) {
            Some(deadline) if duration <= FAR_FUTURE => deadline,
            _ => {
                tracing::debug!(?duration, "timer duration clamped");
                now + FAR_FUTURE
            }
        };
        self.arm_at(deadline)
    }

    /// Arm a timer at an absolute deadline
    pub fn arm_at(&self, deadline: Instant) -> Timer<C> {
        let id = self.lock().schedule(deadline);
        Timer {
            id,
            deadline,
            timers: self.clone(),
        }
    }

    /// Timers armed but neither fired nor cancelled
    pub fn pending(&self) -> usize {
        self.lock().pending()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Scheduler> {
        self.scheduler.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A single armed deadline
pub struct Timer<C: Clock> {
    id: TimerId,
    deadline: Instant,
    timers: Timers<C>,
}

impl<C: Clock> Timer<C> {
    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Resolves once the deadline passes. Never resolves if the timer was
    /// cancelled first.
    ///
    /// Cancel-safe: dropping the future before it resolves leaves the timer
    /// armed, and a later call picks it up again.
    pub async fn fired(&self) {
        loop {
            tokio::time::sleep_until(self.deadline).await;

            let now = self.timers.clock.now();
            let (fired, pending) = {
                let mut scheduler = self.timers.lock();
                let fired = scheduler.claim(self.id, now).is_some();
                (fired, scheduler.is_pending(self.id))
            };
            if fired {
                return;
            }
            if !pending {
                std::future::pending::<()>().await;
            }
            // Clock lags tokio time; wait out the difference
            let lag = self.deadline.saturating_duration_since(now);
            tokio::time::sleep(lag.max(Duration::from_millis(1))).await;
        }
    }

    /// Revoke the timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&self) -> bool {
        let cancelled = self.timers.lock().cancel(self.id);
        if cancelled {
            tracing::trace!(timer = %self.id, "timer cancelled");
        }
        cancelled
    }

    pub fn is_pending(&self) -> bool {
        self.timers.lock().is_pending(self.id)
    }
}

#[cfg(test)]
#[path = "timers_tests.rs"]
mod tests;
