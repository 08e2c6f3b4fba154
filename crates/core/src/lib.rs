// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sg-core: Core library for the stagegate release-approval orchestrator
//!
//! This crate provides:
//! - The stage catalog data model (stage specs, flow configs, built-in catalogs)
//! - The pure run and stage state machines
//! - Signal payloads delivered into runs from outside
//! - Clock and timer-scheduler abstractions for testable time handling

pub mod clock;
pub mod id;
pub mod retry;
pub mod scheduler;

// Data model (order matters for dependencies)
pub mod stage;
pub mod catalog;
pub mod signal;
pub mod run;

// Re-exports
pub use catalog::{
    default_catalog, full_catalog, CatalogError, FlowConfig, TimelineEntry, TimelineStatus,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use id::{RunId, VersionId, RUN_ID_PREFIX};
pub use retry::RetryPolicy;
pub use run::{RunEvent, RunState, RunStatus, StageStatus, COMPLETED_STAGE};
pub use scheduler::{Scheduler, TimerId};
pub use signal::{ApprovalEvent, Signal, TestOutcome};
pub use stage::{StageKind, StageSpec};
