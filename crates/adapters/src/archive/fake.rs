// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake archive adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ArchiveAdapter, ArchiveError};
use async_trait::async_trait;
use sg_core::VersionId;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeArchiveState {
    archived: Vec<VersionId>,
    attempts: u32,
    fail_next: u32,
}

/// Fake archive adapter for testing
#[derive(Clone, Default)]
pub struct FakeArchiveAdapter {
    inner: Arc<Mutex<FakeArchiveState>>,
}

impl FakeArchiveAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `n` archive calls
    pub fn fail_next(&self, n: u32) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail_next = n;
    }

    /// Versions archived successfully
    pub fn archived(&self) -> Vec<VersionId> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .archived
            .clone()
    }

    pub fn attempts(&self) -> u32 {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).attempts
    }
}

#[async_trait]
impl ArchiveAdapter for FakeArchiveAdapter {
    async fn archive(&self, version: &VersionId) -> Result<(), ArchiveError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.attempts += 1;
        if state.fail_next > 0 {
            state.fail_next -= 1;
            return Err(ArchiveError::Failed("injected failure".to_string()));
        }
        state.archived.push(version.clone());
        Ok(())
    }
}
