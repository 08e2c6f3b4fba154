// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration

use serde::{Deserialize, Serialize};
use sg_core::RetryPolicy;
use std::time::Duration;

/// Fixed deadline of every test gate
pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(96 * 3600);

/// Settings shared by every run of an orchestrator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Policy for notify, archive and catalog activities
    pub activity: RetryPolicy,
    pub gates: GateConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Test gates ignore the stage timeout and wait this long instead
    #[serde(with = "humantime_serde")]
    pub test_timeout: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            test_timeout: DEFAULT_TEST_TIMEOUT,
        }
    }
}
