// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake catalog adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CatalogAdapter, CatalogLookupError};
use async_trait::async_trait;
use sg_core::FlowConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded catalog lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCall {
    pub config_id: String,
}

#[derive(Default)]
struct FakeCatalogState {
    flows: HashMap<String, FlowConfig>,
    unavailable: bool,
    calls: Vec<CatalogCall>,
}

/// Fake catalog adapter for testing
#[derive(Clone, Default)]
pub struct FakeCatalogAdapter {
    inner: Arc<Mutex<FakeCatalogState>>,
}

impl FakeCatalogAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flow under an id
    pub fn add_flow(&self, id: &str, flow: FlowConfig) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .flows
            .insert(id.to_string(), flow);
    }

    /// Make every lookup fail as if the source were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).unavailable = unavailable;
    }

    /// Get all recorded lookups
    pub fn calls(&self) -> Vec<CatalogCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }
}

#[async_trait]
impl CatalogAdapter for FakeCatalogAdapter {
    async fn fetch(&self, config_id: &str) -> Result<FlowConfig, CatalogLookupError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(CatalogCall {
            config_id: config_id.to_string(),
        });
        if state.unavailable {
            return Err(CatalogLookupError::Unavailable("fake outage".to_string()));
        }
        state
            .flows
            .get(config_id)
            .cloned()
            .ok_or_else(|| CatalogLookupError::NotFound(config_id.to_string()))
    }
}
