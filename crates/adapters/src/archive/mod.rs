// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Archive adapters, invoked once a run completes successfully

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeArchiveAdapter;

use async_trait::async_trait;
use sg_core::VersionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive failed: {0}")]
    Failed(String),
}

/// Adapter for filing away a completed version
#[async_trait]
pub trait ArchiveAdapter: Clone + Send + Sync + 'static {
    async fn archive(&self, version: &VersionId) -> Result<(), ArchiveError>;
}

/// Records the archive step in the log
#[derive(Clone, Copy, Debug, Default)]
pub struct LogArchiveAdapter;

impl LogArchiveAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArchiveAdapter for LogArchiveAdapter {
    async fn archive(&self, version: &VersionId) -> Result<(), ArchiveError> {
        tracing::info!(target: "stagegate::archive", %version, "version archived");
        Ok(())
    }
}

/// Archive adapter that does nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpArchiveAdapter;

impl NoOpArchiveAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArchiveAdapter for NoOpArchiveAdapter {
    async fn archive(&self, _version: &VersionId) -> Result<(), ArchiveError> {
        Ok(())
    }
}
