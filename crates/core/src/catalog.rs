// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flow configs (stage catalogs)
//!
//! A flow config is the ordered list of stages a run walks through. It is
//! fetched once when a run starts and never changes for that run.

use crate::run::COMPLETED_STAGE;
use crate::stage::StageSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors from building a flow config
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate stage key: {0}")]
    DuplicateKey(String),
    #[error("stage key is reserved: {0}")]
    ReservedKey(String),
    #[error("stage key must not be empty")]
    EmptyKey,
}

/// An ordered, validated stage catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StageSpec>", into = "Vec<StageSpec>")]
pub struct FlowConfig {
    stages: Vec<StageSpec>,
}

impl FlowConfig {
    /// Validate stage keys and sort stages by ascending `order`.
    ///
    /// The sort is stable, so stages sharing an `order` keep their listed order.
    pub fn new(mut stages: Vec<StageSpec>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for stage in &stages {
            if stage.key.is_empty() {
                return Err(CatalogError::EmptyKey);
            }
            if stage.key == COMPLETED_STAGE {
                return Err(CatalogError::ReservedKey(stage.key.clone()));
            }
            if !seen.insert(stage.key.as_str()) {
                return Err(CatalogError::DuplicateKey(stage.key.clone()));
            }
        }
        stages.sort_by_key(|s| s.order);
        Ok(Self { stages })
    }

    /// All stages in processing order, disabled ones included
    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    /// Enabled stages in processing order
    pub fn enabled(&self) -> impl Iterator<Item = &StageSpec> {
        self.stages.iter().filter(|s| s.enabled)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Progress of every enabled stage relative to `current_stage`.
    ///
    /// Stages before the current one are completed, the current one is in
    /// progress, later ones are pending. The completed sentinel marks every
    /// stage completed; an unknown key marks every stage pending.
    pub fn timeline(&self, current_stage: &str) -> Vec<TimelineEntry> {
        let known = current_stage == COMPLETED_STAGE
            || self.enabled().any(|s| s.key == current_stage);
        let mut current_found = !known;

        self.enabled()
            .map(|stage| {
                let status = if stage.key == current_stage {
                    current_found = true;
                    TimelineStatus::InProgress
                } else if current_found {
                    TimelineStatus::Pending
                } else {
                    TimelineStatus::Completed
                };
                TimelineEntry {
                    key: stage.key.clone(),
                    name: stage.name.clone(),
                    status,
                }
            })
            .collect()
    }
}

impl TryFrom<Vec<StageSpec>> for FlowConfig {
    type Error = CatalogError;

    fn try_from(stages: Vec<StageSpec>) -> Result<Self, Self::Error> {
        FlowConfig::new(stages)
    }
}

impl From<FlowConfig> for Vec<StageSpec> {
    fn from(config: FlowConfig) -> Self {
        config.stages
    }
}

/// Progress of one stage in a run's timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub key: String,
    pub name: String,
    pub status: TimelineStatus,
}

/// Built-in catalog used when a flow config cannot be resolved.
///
/// BTE round, then production round, then two auto-passing confirmations.
pub fn default_catalog() -> FlowConfig {
    FlowConfig {
        stages: vec![
            StageSpec::approval("bte_confirm", "BTE Item Confirm", 72, 1),
            StageSpec::approval("bte_finalize", "BTE Finalize", 48, 2),
            StageSpec::prepare("bte_prepare", "BTE Version Prepare", 24, 3),
            StageSpec::test("bte_test", "BTE Test", 96, 4),
            StageSpec::approval("prod_finalize", "Production Finalize", 48, 5),
            StageSpec::prepare("prod_prepare", "Production Version Prepare", 24, 6),
            StageSpec::test("prod_test", "Production Test", 96, 7),
            StageSpec::approval("close_confirm", "Close Confirm", 72, 8).with_auto_pass(),
            StageSpec::approval("end_confirm", "End Confirm", 48, 9).with_auto_pass(),
        ],
    }
}

/// Full catalog including the gray (canary) round
pub fn full_catalog() -> FlowConfig {
    FlowConfig {
        stages: vec![
            StageSpec::approval("bte_confirm", "BTE Item Confirm", 72, 1),
            StageSpec::approval("bte_finalize", "BTE Finalize", 48, 2),
            StageSpec::prepare("bte_prepare", "BTE Version Prepare", 24, 3),
            StageSpec::test("bte_test", "BTE Test", 96, 4),
            StageSpec::approval("gray_confirm", "Gray Item Confirm", 48, 5),
            StageSpec::approval("gray_finalize", "Gray Finalize", 24, 6),
            StageSpec::prepare("gray_prepare", "Gray Version Prepare", 24, 7),
            StageSpec::test("gray_test", "Gray Test", 96, 8),
            StageSpec::approval("prod_finalize", "Production Finalize", 48, 9),
            StageSpec::prepare("prod_prepare", "Production Version Prepare", 24, 10),
            StageSpec::test("prod_test", "Production Test", 96, 11),
            StageSpec::approval("close_confirm", "Close Confirm", 72, 12).with_auto_pass(),
            StageSpec::approval("end_confirm", "End Confirm", 48, 13).with_auto_pass(),
        ],
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
