// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gate primitives
//!
//! Each gate races the stage's signal channel against one timer. The timer's
//! deadline is fixed when the gate is entered and is cancelled as soon as a
//! signal decides the gate.

use crate::error::FlowError;
use crate::handle::RunHandle;
use crate::inbox::Inbox;
use crate::timers::Timers;
use sg_core::{ApprovalEvent, Clock, RunEvent, StageSpec, StageStatus, TestOutcome};
use std::time::Duration;

/// The gates of one run, sharing its inbox, timers and record
pub struct Gates<'a, C: Clock> {
    inbox: &'a mut Inbox,
    timers: &'a Timers<C>,
    handle: &'a RunHandle,
}

impl<'a, C: Clock> Gates<'a, C> {
    pub fn new(inbox: &'a mut Inbox, timers: &'a Timers<C>, handle: &'a RunHandle) -> Self {
        Self {
            inbox,
            timers,
            handle,
        }
    }

    /// Wait for an approval, looping on rejections until the stage deadline.
    pub async fn approval(&mut self, stage: &StageSpec) -> Result<StageStatus, FlowError> {
        let timer = self.timers.arm(stage.timeout);
        let mut rejections = 0u32;

        loop {
            tokio::select! {
                biased;

                event = next_approval(self.inbox, &stage.key) => {
                    if event.approved {
                        timer.cancel();
                        tracing::info!(operator = %event.operator, rejections, "approved");
                        return Ok(StageStatus::Passed);
                    }
                    rejections += 1;
                    self.record_rejection(&event);
                }
                () = timer.fired() => {
                    tracing::warn!(rejections, "approval deadline passed");
                    return Err(FlowError::StageTimeout {
                        stage: stage.key.clone(),
                    });
                }
            }
        }
    }

    /// Single race: an unanswered deadline passes the stage, an explicit
    /// rejection fails it.
    pub async fn approval_auto_pass(
        &mut self,
        stage: &StageSpec,
    ) -> Result<StageStatus, FlowError> {
        let timer = self.timers.arm(stage.timeout);

        tokio::select! {
            biased;

            event = next_approval(self.inbox, &stage.key) => {
                timer.cancel();
                if event.approved {
                    tracing::info!(operator = %event.operator, "approved");
                    Ok(StageStatus::Passed)
                } else {
                    self.record_rejection(&event);
                    Err(FlowError::StageRejected {
                        stage: stage.key.clone(),
                        comment: event.comment,
                    })
                }
            }
            () = timer.fired() => {
                tracing::info!("no answer before deadline, auto-passed");
                Ok(StageStatus::AutoPassed)
            }
        }
    }

    /// Wait for the stage's test outcome. The stage's own timeout is not
    /// used; every test gate waits `timeout`.
    pub async fn test(&mut self, stage: &StageSpec, timeout: Duration) -> Result<bool, FlowError> {
        let timer = self.timers.arm(timeout);

        tokio::select! {
            biased;

            outcome = next_test(self.inbox, &stage.key) => {
                timer.cancel();
                tracing::info!(all_passed = outcome.all_passed, "test outcome received");
                Ok(outcome.all_passed)
            }
            () = timer.fired() => {
                tracing::warn!("no test outcome before deadline");
                Err(FlowError::StageTimeout {
                    stage: stage.key.clone(),
                })
            }
        }
    }

    fn record_rejection(&self, event: &ApprovalEvent) {
        tracing::info!(operator = %event.operator, comment = %event.comment, "approval rejected");
        self.handle.record(RunEvent::ApprovalRejected {
            stage: event.stage_key.clone(),
            operator: event.operator.clone(),
            comment: event.comment.clone(),
        });
    }
}

// A closed inbox can never deliver again; leave the race to the timer.
async fn next_approval(inbox: &mut Inbox, stage_key: &str) -> ApprovalEvent {
    match inbox.recv_approval(stage_key).await {
        Some(event) => event,
        None => std::future::pending().await,
    }
}

async fn next_test(inbox: &mut Inbox, stage_key: &str) -> TestOutcome {
    match inbox.recv_test(stage_key).await {
        Some(outcome) => outcome,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "gates_tests.rs"]
mod tests;
