// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog adapters backed by the flow store or an in-memory map

use super::{CatalogAdapter, CatalogLookupError};
use async_trait::async_trait;
use sg_core::FlowConfig;
use sg_storage::{FlowStore, StorageError};
use std::collections::HashMap;
use std::sync::Arc;

/// Looks flow configs up in a [`FlowStore`] file
#[derive(Clone, Debug)]
pub struct StoreCatalogAdapter {
    store: FlowStore,
}

impl StoreCatalogAdapter {
    pub fn new(store: FlowStore) -> Self {
        Self { store }
    }
}

fn lookup_error(err: StorageError) -> CatalogLookupError {
    match err {
        StorageError::NotFound(id) => CatalogLookupError::NotFound(id),
        StorageError::InvalidCatalog { id, source } => CatalogLookupError::Invalid {
            id,
            reason: source.to_string(),
        },
        other => CatalogLookupError::Unavailable(other.to_string()),
    }
}

#[async_trait]
impl CatalogAdapter for StoreCatalogAdapter {
    async fn fetch(&self, config_id: &str) -> Result<FlowConfig, CatalogLookupError> {
        let store = self.store.clone();
        let id = config_id.to_string();

        let result = tokio::task::spawn_blocking(move || {
            let record = if id.is_empty() {
                store
                    .default_record()?
                    .ok_or_else(|| StorageError::NotFound("<default>".to_string()))?
            } else {
                store.get(&id)?
            };
            record.flow_config()
        })
        .await
        .map_err(|e| CatalogLookupError::Unavailable(e.to_string()))?;

        result.map_err(lookup_error)
    }
}

/// Serves flow configs from memory
#[derive(Clone, Debug, Default)]
pub struct StaticCatalogAdapter {
    flows: Arc<HashMap<String, FlowConfig>>,
    default_id: Option<String>,
}

impl StaticCatalogAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flow(self, id: impl Into<String>, flow: FlowConfig) -> Self {
        let mut flows = (*self.flows).clone();
        flows.insert(id.into(), flow);
        Self {
            flows: Arc::new(flows),
            ..self
        }
    }

    /// Flow served for an empty id
    pub fn with_default(self, id: impl Into<String>) -> Self {
        Self {
            default_id: Some(id.into()),
            ..self
        }
    }
}

#[async_trait]
impl CatalogAdapter for StaticCatalogAdapter {
    async fn fetch(&self, config_id: &str) -> Result<FlowConfig, CatalogLookupError> {
        let id = match (config_id.is_empty(), &self.default_id) {
            (true, Some(default)) => default.as_str(),
            _ => config_id,
        };
        self.flows
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogLookupError::NotFound(config_id.to_string()))
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
