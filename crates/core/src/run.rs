// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run state machine
//!
//! A run walks one version through its flow config. Status only ever moves
//! forward: Running → Completed | Failed. Once terminal, every further event
//! is ignored.

use crate::id::VersionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel `current_stage` of a run that has passed every stage
pub const COMPLETED_STAGE: &str = "completed";

/// Overall status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn name(&self) -> &'static str {
        match self {
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress of a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    NotStarted,
    /// Gate is waiting; rejected approvals stay here
    Active,
    /// Approved, or test signal reported all passed
    Passed,
    /// Auto-pass stage reached its deadline unanswered
    AutoPassed,
    /// Auto-pass stage explicitly rejected
    Rejected,
    TimedOut,
    /// Test signal reported failures
    TestFailed,
    /// Disabled in the flow config
    Skipped,
}

impl StageStatus {
    pub fn name(&self) -> &'static str {
        match self {
            StageStatus::NotStarted => "not_started",
            StageStatus::Active => "active",
            StageStatus::Passed => "passed",
            StageStatus::AutoPassed => "auto_passed",
            StageStatus::Rejected => "rejected",
            StageStatus::TimedOut => "timed_out",
            StageStatus::TestFailed => "test_failed",
            StageStatus::Skipped => "skipped",
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, StageStatus::NotStarted | StageStatus::Active)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StageStatus::Passed | StageStatus::AutoPassed)
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Events recorded against a run, in the order they happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    StageEntered {
        stage: String,
    },
    StageSkipped {
        stage: String,
    },
    ApprovalRejected {
        stage: String,
        operator: String,
        comment: String,
    },
    StageResolved {
        stage: String,
        status: StageStatus,
    },
    /// Every enabled stage resolved successfully
    AllStagesPassed,
    Completed,
    Failed {
        reason: String,
    },
}

impl RunEvent {
    pub fn name(&self) -> &'static str {
        match self {
            RunEvent::StageEntered { .. } => "stage:entered",
            RunEvent::StageSkipped { .. } => "stage:skipped",
            RunEvent::ApprovalRejected { .. } => "stage:rejected",
            RunEvent::StageResolved { .. } => "stage:resolved",
            RunEvent::AllStagesPassed => "run:stages_passed",
            RunEvent::Completed => "run:completed",
            RunEvent::Failed { .. } => "run:failed",
        }
    }
}

/// Observable state of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub version_id: VersionId,
    pub item_ids: Vec<String>,
    /// Key of the stage being processed; empty until the catalog is loaded
    pub current_stage: String,
    pub status: RunStatus,
    pub failure_message: Option<String>,
}

impl RunState {
    pub fn new(version_id: impl Into<VersionId>, item_ids: Vec<String>) -> Self {
        Self {
            version_id: version_id.into(),
            item_ids,
            current_stage: String::new(),
            status: RunStatus::Running,
            failure_message: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Pure transition function - returns the new state
    pub fn transition(&self, event: &RunEvent) -> RunState {
        if self.is_terminal() {
            return self.clone();
        }

        match event {
            RunEvent::StageEntered { stage } => RunState {
                current_stage: stage.clone(),
                ..self.clone()
            },
            RunEvent::AllStagesPassed => RunState {
                current_stage: COMPLETED_STAGE.to_string(),
                ..self.clone()
            },
            RunEvent::Completed => RunState {
                current_stage: COMPLETED_STAGE.to_string(),
                status: RunStatus::Completed,
                ..self.clone()
            },
            RunEvent::Failed { reason } => RunState {
                status: RunStatus::Failed,
                failure_message: Some(reason.clone()),
                ..self.clone()
            },
            // Informational - no change
            RunEvent::StageSkipped { .. }
            | RunEvent::ApprovalRejected { .. }
            | RunEvent::StageResolved { .. } => self.clone(),
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
