// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file store of named flow configs
//!
//! The store file holds a JSON array of records. Stage lists are kept as
//! written so that an invalid catalog can still be loaded and reported.

use serde::{Deserialize, Serialize};
use sg_core::{default_catalog, full_catalog, CatalogError, FlowConfig, StageSpec};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Id of the seeded full flow
pub const DEFAULT_FLOW_ID: &str = "default";
/// Id of the seeded shortened flow
pub const URGENT_FLOW_ID: &str = "urgent";

/// Errors that can occur in flow store operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("flow config not found: {0}")]
    NotFound(String),
    #[error("flow config {id} is invalid: {source}")]
    InvalidCatalog {
        id: String,
        #[source]
        source: CatalogError,
    },
}

/// A stored, named flow config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfigRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub stages: Vec<StageSpec>,
    #[serde(default)]
    pub is_default: bool,
}

impl FlowConfigRecord {
    /// Validate and order the stored stages
    pub fn flow_config(&self) -> Result<FlowConfig, StorageError> {
        FlowConfig::new(self.stages.clone()).map_err(|source| StorageError::InvalidCatalog {
            id: self.id.clone(),
            source,
        })
    }

    fn from_catalog(id: &str, name: &str, description: &str, catalog: FlowConfig) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            stages: catalog.into(),
            is_default: false,
        }
    }
}

/// Flow configs persisted in a single JSON file
#[derive(Debug, Clone)]
pub struct FlowStore {
    path: PathBuf,
}

impl FlowStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record. A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<FlowConfigRecord>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Replace the store contents
    pub fn save(&self, records: &[FlowConfigRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<FlowConfigRecord, StorageError> {
        self.load()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    /// The record flagged as default, if any
    pub fn default_record(&self) -> Result<Option<FlowConfigRecord>, StorageError> {
        Ok(self.load()?.into_iter().find(|r| r.is_default))
    }

    /// Insert or replace a record by id.
    ///
    /// Marking a record as default clears the flag on every other record.
    pub fn upsert(&self, record: FlowConfigRecord) -> Result<(), StorageError> {
        let mut records = self.load()?;
        if record.is_default {
            for r in records.iter_mut() {
                r.is_default = false;
            }
        }
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        self.save(&records)
    }

    /// Resolve a flow config by id
    pub fn flow_config(&self, id: &str) -> Result<FlowConfig, StorageError> {
        self.get(id)?.flow_config()
    }

    /// Write the built-in flows: the full flow as "default" and the
    /// shortened flow as "urgent". Returns the seeded ids.
    pub fn seed_defaults(&self) -> Result<Vec<String>, StorageError> {
        let mut full = FlowConfigRecord::from_catalog(
            DEFAULT_FLOW_ID,
            "Standard upgrade",
            "BTE, gray and production rollout with final confirmations",
            full_catalog(),
        );
        full.is_default = true;
        let urgent = FlowConfigRecord::from_catalog(
            URGENT_FLOW_ID,
            "Urgent upgrade",
            "Skips the gray rollout",
            default_catalog(),
        );

        let ids = vec![full.id.clone(), urgent.id.clone()];
        self.upsert(full)?;
        self.upsert(urgent)?;
        tracing::info!(path = %self.path.display(), "seeded flow configs");
        Ok(ids)
    }
}

#[cfg(test)]
#[path = "flow_store_tests.rs"]
mod tests;
