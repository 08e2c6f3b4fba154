// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared, observable record of one run

use serde::Serialize;
use sg_core::{
    FlowConfig, RunEvent, RunId, RunState, StageStatus, TimelineEntry,
};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Progress of one stage of the run's catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageProgress {
    pub key: String,
    pub name: String,
    pub status: StageStatus,
}

/// Point-in-time view of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSnapshot {
    pub run_id: RunId,
    pub state: RunState,
    pub stages: Vec<StageProgress>,
    pub timeline: Vec<TimelineEntry>,
    pub journal: Vec<RunEvent>,
}

#[derive(Debug)]
struct RunRecord {
    state: RunState,
    catalog: Option<FlowConfig>,
    stages: Vec<StageProgress>,
    journal: Vec<RunEvent>,
}

/// Handle to a run's state, written by its orchestrator and read by anyone
#[derive(Clone, Debug)]
pub struct RunHandle {
    run_id: RunId,
    record: Arc<Mutex<RunRecord>>,
    watch: Arc<watch::Sender<RunState>>,
}

impl RunHandle {
    pub fn new(run_id: RunId, state: RunState) -> Self {
        let (tx, _rx) = watch::channel(state.clone());
        Self {
            run_id,
            record: Arc::new(Mutex::new(RunRecord {
                state,
                catalog: None,
                stages: Vec::new(),
                journal: Vec::new(),
            })),
            watch: Arc::new(tx),
        }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// Attach the catalog the run walks through
    pub fn set_catalog(&self, catalog: FlowConfig) {
        let mut record = self.lock();
        record.stages = catalog
            .stages()
            .iter()
            .map(|s| StageProgress {
                key: s.key.clone(),
                name: s.name.clone(),
                status: StageStatus::NotStarted,
            })
            .collect();
        record.catalog = Some(catalog);
    }

    /// Append an event to the journal and apply it.
    ///
    /// Events after the run has terminated are dropped.
    pub fn record(&self, event: RunEvent) -> RunState {
        let state = {
            let mut record = self.lock();
            if record.state.is_terminal() {
                tracing::debug!(event = event.name(), "run already terminal, event ignored");
                return record.state.clone();
            }

            let stage_update = match &event {
                RunEvent::StageEntered { stage } => Some((stage, StageStatus::Active)),
                RunEvent::StageSkipped { stage } => Some((stage, StageStatus::Skipped)),
                RunEvent::StageResolved { stage, status } => Some((stage, *status)),
                _ => None,
            };
            if let Some((key, status)) = stage_update {
                if let Some(progress) = record.stages.iter_mut().find(|s| &s.key == key) {
                    progress.status = status;
                }
            }

            record.state = record.state.transition(&event);
            record.journal.push(event);
            record.state.clone()
        };
        self.watch.send_replace(state.clone());
        state
    }

    pub fn state(&self) -> RunState {
        self.lock().state.clone()
    }

    pub fn journal(&self) -> Vec<RunEvent> {
        self.lock().journal.clone()
    }

    pub fn stage_status(&self, key: &str) -> Option<StageStatus> {
        self.lock()
            .stages
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.status)
    }

    pub fn snapshot(&self) -> RunSnapshot {
        let record = self.lock();
        let timeline = record
            .catalog
            .as_ref()
            .map(|c| c.timeline(&record.state.current_stage))
            .unwrap_or_default();
        RunSnapshot {
            run_id: self.run_id.clone(),
            state: record.state.clone(),
            stages: record.stages.clone(),
            timeline,
            journal: record.journal.clone(),
        }
    }

    /// Receive every state change from now on
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.watch.subscribe()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RunRecord> {
        self.record.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
