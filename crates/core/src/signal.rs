// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signals delivered into a run from outside
//!
//! Every signal names the channel it is delivered on. A gate only consumes
//! signals from its own stage's channel; anything else stays queued.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A human decision on an approval or prepare stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalEvent {
    #[serde(rename = "stage")]
    pub stage_key: String,
    pub operator: String,
    pub approved: bool,
    #[serde(default)]
    pub comment: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ApprovalEvent {
    pub fn approve(stage_key: impl Into<String>, operator: impl Into<String>) -> Self {
        Self {
            stage_key: stage_key.into(),
            operator: operator.into(),
            approved: true,
            comment: String::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn reject(
        stage_key: impl Into<String>,
        operator: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            stage_key: stage_key.into(),
            operator: operator.into(),
            approved: false,
            comment: comment.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_comment(self, comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            ..self
        }
    }
}

/// Result of a test round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    #[serde(rename = "stage")]
    pub stage_key: String,
    pub all_passed: bool,
}

impl TestOutcome {
    pub fn new(stage_key: impl Into<String>, all_passed: bool) -> Self {
        Self {
            stage_key: stage_key.into(),
            all_passed,
        }
    }
}

/// Any signal a run can receive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Signal {
    Approval(ApprovalEvent),
    Test(TestOutcome),
}

impl Signal {
    pub fn stage_key(&self) -> &str {
        match self {
            Signal::Approval(event) => &event.stage_key,
            Signal::Test(outcome) => &outcome.stage_key,
        }
    }

    /// Channel this signal is delivered on
    pub fn channel(&self) -> String {
        match self {
            Signal::Approval(event) => Signal::approval_channel(&event.stage_key),
            Signal::Test(outcome) => Signal::test_channel(&outcome.stage_key),
        }
    }

    pub fn approval_channel(stage_key: &str) -> String {
        format!("{stage_key}-approval")
    }

    pub fn test_channel(stage_key: &str) -> String {
        format!("{stage_key}-test-complete")
    }
}

impl From<ApprovalEvent> for Signal {
    fn from(event: ApprovalEvent) -> Self {
        Signal::Approval(event)
    }
}

impl From<TestOutcome> for Signal {
    fn from(outcome: TestOutcome) -> Self {
        Signal::Test(outcome)
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
