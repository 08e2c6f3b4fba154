// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use sg_core::RunId;
use thiserror::Error;

/// Errors that end a run
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("stage {stage} timed out")]
    StageTimeout { stage: String },
    #[error("stage {stage} rejected: {comment}")]
    StageRejected { stage: String, comment: String },
    #[error("activity {activity} failed after {attempts} attempts: {message}")]
    ActivityFailed {
        activity: String,
        attempts: u32,
        message: String,
    },
}

/// Errors from the multi-run runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("run {0} is already active")]
    RunAlreadyActive(RunId),
    #[error("run not found: {0}")]
    RunNotFound(RunId),
    #[error("run {0} is no longer accepting signals")]
    RunNotActive(RunId),
    #[error("run {run_id} task did not finish: {message}")]
    Join { run_id: RunId, message: String },
    #[error(transparent)]
    Flow(#[from] FlowError),
}
