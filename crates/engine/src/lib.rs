// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! stagegate execution engine
//!
//! In-process durable-execution substrate: per-run signal inboxes, revocable
//! timers and retried activities, plus the gates and orchestrator built on
//! them and a runtime hosting many runs at once.

pub mod activity;
mod config;
mod error;
mod gates;
mod handle;
mod inbox;
mod orchestrator;
mod runtime;
mod timers;

pub use config::{EngineConfig, GateConfig, DEFAULT_TEST_TIMEOUT};
pub use error::{FlowError, RuntimeError};
pub use gates::Gates;
pub use handle::{RunHandle, RunSnapshot, StageProgress};
pub use inbox::{inbox, Inbox, SignalSender};
pub use orchestrator::{Orchestrator, RunContext, RunOutcome, RunRequest, COMPLETED_MESSAGE};
pub use runtime::{Runtime, RuntimeDeps};
pub use timers::{Timer, Timers};
