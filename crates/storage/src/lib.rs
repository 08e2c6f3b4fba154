// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sg-storage: persisted flow configs for stagegate

mod flow_store;

pub use flow_store::{FlowConfigRecord, FlowStore, StorageError, DEFAULT_FLOW_ID, URGENT_FLOW_ID};
