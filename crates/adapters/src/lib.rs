// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the side effects of a run: catalog lookup, notification
//! and archiving

pub mod archive;
pub mod catalog;
pub mod notify;
pub mod traced;

pub use archive::{ArchiveAdapter, ArchiveError, LogArchiveAdapter, NoOpArchiveAdapter};
pub use catalog::{CatalogAdapter, CatalogLookupError, StaticCatalogAdapter, StoreCatalogAdapter};
pub use notify::{LogNotifyAdapter, NoOpNotifyAdapter, NotifyAdapter, NotifyError};
pub use traced::{TracedArchiveAdapter, TracedCatalogAdapter, TracedNotifyAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use archive::FakeArchiveAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use catalog::{CatalogCall, FakeCatalogAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
