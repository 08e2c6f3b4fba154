// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::archive::{ArchiveAdapter, ArchiveError};
use crate::catalog::{CatalogAdapter, CatalogLookupError};
use crate::notify::{NotifyAdapter, NotifyError};
use async_trait::async_trait;
use sg_core::{FlowConfig, VersionId};
use tracing::Instrument;

/// Wrapper that adds tracing to any CatalogAdapter
#[derive(Clone)]
pub struct TracedCatalogAdapter<C> {
    inner: C,
}

impl<C> TracedCatalogAdapter<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: CatalogAdapter> CatalogAdapter for TracedCatalogAdapter<C> {
    async fn fetch(&self, config_id: &str) -> Result<FlowConfig, CatalogLookupError> {
        let span = tracing::info_span!("catalog.fetch", config_id);

        async {
            tracing::info!("starting");
            let start = std::time::Instant::now();
            let result = self.inner.fetch(config_id).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(flow) => tracing::info!(stages = flow.len(), elapsed_ms, "catalog loaded"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "lookup failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any NotifyAdapter
#[derive(Clone)]
pub struct TracedNotifyAdapter<N> {
    inner: N,
}

impl<N> TracedNotifyAdapter<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<N: NotifyAdapter> NotifyAdapter for TracedNotifyAdapter<N> {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let span = tracing::info_span!("notify.send");

        async {
            tracing::debug!(message_len = message.len(), "sending");
            let start = std::time::Instant::now();
            let result = self.inner.notify(message).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            // Notifications are best-effort; the caller decides whether to retry
            match &result {
                Ok(()) => tracing::debug!(elapsed_ms, "sent"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "send failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any ArchiveAdapter
#[derive(Clone)]
pub struct TracedArchiveAdapter<A> {
    inner: A,
}

impl<A> TracedArchiveAdapter<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<A: ArchiveAdapter> ArchiveAdapter for TracedArchiveAdapter<A> {
    async fn archive(&self, version: &VersionId) -> Result<(), ArchiveError> {
        let span = tracing::info_span!("archive.run", %version);

        async {
            tracing::info!("archiving");
            let start = std::time::Instant::now();
            let result = self.inner.archive(version).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "archived"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "archive failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
