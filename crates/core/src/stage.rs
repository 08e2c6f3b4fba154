// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage descriptors
//!
//! A stage is one gated unit of the upgrade pipeline. Stages are pure data;
//! the engine decides which gate primitive serves a stage from its kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The kind of gate a stage waits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    /// Human sign-off
    Approval,
    /// Environment preparation, confirmed by a human
    Prepare,
    /// Test round, resolved by a test-completion signal
    Test,
}

impl StageKind {
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Approval => "approval",
            StageKind::Prepare => "prepare",
            StageKind::Test => "test",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single stage of a flow config
///
/// Serialized in the persisted flow-config format:
/// `{"key", "name", "type", "enabled", "timeout", "auto_pass", "order"}`
/// with `timeout` counted in whole hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSpec {
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StageKind,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, with = "hours")]
    pub timeout: Duration,
    #[serde(default)]
    pub auto_pass: bool,
    #[serde(default)]
    pub order: i32,
}

impl StageSpec {
    /// Create an enabled stage
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        kind: StageKind,
        timeout: Duration,
        order: i32,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            kind,
            enabled: true,
            timeout,
            auto_pass: false,
            order,
        }
    }

    pub fn approval(key: impl Into<String>, name: impl Into<String>, hours: u64, order: i32) -> Self {
        Self::new(key, name, StageKind::Approval, from_hours(hours), order)
    }

    pub fn prepare(key: impl Into<String>, name: impl Into<String>, hours: u64, order: i32) -> Self {
        Self::new(key, name, StageKind::Prepare, from_hours(hours), order)
    }

    pub fn test(key: impl Into<String>, name: impl Into<String>, hours: u64, order: i32) -> Self {
        Self::new(key, name, StageKind::Test, from_hours(hours), order)
    }

    /// Treat an unanswered approval past its deadline as accepted
    pub fn with_auto_pass(self) -> Self {
        Self {
            auto_pass: true,
            ..self
        }
    }

    pub fn with_enabled(self, enabled: bool) -> Self {
        Self { enabled, ..self }
    }
}

const SECS_PER_HOUR: u64 = 3600;

fn from_hours(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(SECS_PER_HOUR))
}

/// Serde adapter storing a duration as whole hours
mod hours {
    use super::SECS_PER_HOUR;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(d.as_secs() / SECS_PER_HOUR)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let hours = u64::deserialize(deserializer)?;
        hours
            .checked_mul(SECS_PER_HOUR)
            .map(Duration::from_secs)
            .ok_or_else(|| D::Error::custom(format!("stage timeout of {hours} hours is out of range")))
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
