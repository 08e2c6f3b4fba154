// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime hosting many concurrent runs
//!
//! Each run is one tokio task with its own inbox, timers and record. The
//! runtime routes signals to runs by run id and answers status queries.

use crate::config::EngineConfig;
use crate::error::{FlowError, RuntimeError};
use crate::handle::{RunHandle, RunSnapshot};
use crate::inbox::SignalSender;
use crate::orchestrator::{Orchestrator, RunContext, RunOutcome, RunRequest, COMPLETED_MESSAGE};
use sg_adapters::{ArchiveAdapter, CatalogAdapter, NotifyAdapter};
use sg_core::{Clock, RunId, RunState, Signal};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Runtime adapter dependencies
pub struct RuntimeDeps<K, N, A> {
    pub catalog: K,
    pub notify: N,
    pub archive: A,
}

struct RunEntry {
    sender: SignalSender,
    handle: RunHandle,
    task: Option<JoinHandle<Result<RunOutcome, FlowError>>>,
}

/// Runtime that starts runs and routes signals into them
pub struct Runtime<K, N, A, C: Clock> {
    orchestrator: Arc<Orchestrator<K, N, A>>,
    clock: C,
    runs: Mutex<HashMap<RunId, RunEntry>>,
}

impl<K, N, A, C> Runtime<K, N, A, C>
where
    K: CatalogAdapter,
    N: NotifyAdapter,
    A: ArchiveAdapter,
    C: Clock,
{
    pub fn new(deps: RuntimeDeps<K, N, A>, config: EngineConfig, clock: C) -> Self {
        Self {
            orchestrator: Arc::new(Orchestrator::new(deps, config)),
            clock,
            runs: Mutex::new(HashMap::new()),
        }
    }

    /// Start a run named `upgrade-<version>`.
    ///
    /// A finished run with the same id is replaced; a running one is an error.
    pub fn start(&self, request: RunRequest) -> Result<RunId, RuntimeError> {
        let run_id = request.run_id();
        let mut runs = self.lock();

        if let Some(existing) = runs.get(&run_id) {
            if !existing.handle.state().is_terminal() {
                return Err(RuntimeError::RunAlreadyActive(run_id));
            }
        }

        let (sender, ctx) = RunContext::for_request(&request, self.clock.clone());
        let handle = ctx.handle.clone();
        let orchestrator = Arc::clone(&self.orchestrator);
        let task = tokio::spawn(async move { orchestrator.run(request, ctx).await });

        tracing::info!(%run_id, "run spawned");
        runs.insert(
            run_id.clone(),
            RunEntry {
                sender,
                handle,
                task: Some(task),
            },
        );
        Ok(run_id)
    }

    /// Deliver a signal to a running run
    pub fn signal(&self, run_id: &RunId, signal: Signal) -> Result<(), RuntimeError> {
        let runs = self.lock();
        let entry = runs
            .get(run_id)
            .ok_or_else(|| RuntimeError::RunNotFound(run_id.clone()))?;

        if entry.handle.state().is_terminal() {
            return Err(RuntimeError::RunNotActive(run_id.clone()));
        }
        tracing::debug!(%run_id, channel = %signal.channel(), "signal delivered");
        entry
            .sender
            .send(signal)
            .map_err(|_| RuntimeError::RunNotActive(run_id.clone()))
    }

    /// Current state, stage progress, timeline and journal of a run
    pub fn describe(&self, run_id: &RunId) -> Result<RunSnapshot, RuntimeError> {
        Ok(self.handle(run_id)?.snapshot())
    }

    /// Watch a run's state as it changes
    pub fn subscribe(&self, run_id: &RunId) -> Result<watch::Receiver<RunState>, RuntimeError> {
        Ok(self.handle(run_id)?.subscribe())
    }

    /// Every known run with its current state
    pub fn list(&self) -> Vec<(RunId, RunState)> {
        let mut runs: Vec<_> = self
            .lock()
            .iter()
            .map(|(id, entry)| (id.clone(), entry.handle.state()))
            .collect();
        runs.sort_by(|a, b| a.0.cmp(&b.0));
        runs
    }

    /// Wait for a run to end.
    ///
    /// The first waiter receives the run's own result, errors included.
    /// Later waiters get the outcome read from the run's final state.
    pub async fn wait(&self, run_id: &RunId) -> Result<RunOutcome, RuntimeError> {
        let (task, handle) = {
            let mut runs = self.lock();
            let entry = runs
                .get_mut(run_id)
                .ok_or_else(|| RuntimeError::RunNotFound(run_id.clone()))?;
            (entry.task.take(), entry.handle.clone())
        };

        if let Some(task) = task {
            let joined = task.await.map_err(|e| RuntimeError::Join {
                run_id: run_id.clone(),
                message: e.to_string(),
            })?;
            return Ok(joined?);
        }

        let mut rx = handle.subscribe();
        let state = rx
            .wait_for(RunState::is_terminal)
            .await
            .map_err(|e| RuntimeError::Join {
                run_id: run_id.clone(),
                message: e.to_string(),
            })?
            .clone();
        let message = state
            .failure_message
            .clone()
            .unwrap_or_else(|| COMPLETED_MESSAGE.to_string());
        Ok(RunOutcome {
            run_id: run_id.clone(),
            status: state.status,
            message,
            state,
        })
    }

    fn handle(&self, run_id: &RunId) -> Result<RunHandle, RuntimeError> {
        self.lock()
            .get(run_id)
            .map(|entry| entry.handle.clone())
            .ok_or_else(|| RuntimeError::RunNotFound(run_id.clone()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<RunId, RunEntry>> {
        self.runs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
