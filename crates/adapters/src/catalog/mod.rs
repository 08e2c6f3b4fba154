// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flow-config lookup adapters

mod store;

pub use store::{StaticCatalogAdapter, StoreCatalogAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{CatalogCall, FakeCatalogAdapter};

use async_trait::async_trait;
use sg_core::FlowConfig;
use thiserror::Error;

/// Errors from flow-config lookup
#[derive(Debug, Error)]
pub enum CatalogLookupError {
    #[error("flow config not found: {0}")]
    NotFound(String),
    #[error("flow config {id} is invalid: {reason}")]
    Invalid { id: String, reason: String },
    #[error("catalog source unavailable: {0}")]
    Unavailable(String),
}

/// Resolves a flow-config id to a validated catalog.
///
/// An empty id asks for the source's default flow.
#[async_trait]
pub trait CatalogAdapter: Clone + Send + Sync + 'static {
    async fn fetch(&self, config_id: &str) -> Result<FlowConfig, CatalogLookupError>;
}
