// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator
//!
//! Walks a version through its flow config: every enabled stage in order,
//! each dispatched to the gate for its kind. Stage entry sends a detached
//! notification; a successful run is archived before it is marked completed.

use crate::activity;
use crate::config::EngineConfig;
use crate::error::FlowError;
use crate::gates::Gates;
use crate::handle::RunHandle;
use crate::inbox::{inbox, Inbox, SignalSender};
use crate::runtime::RuntimeDeps;
use crate::timers::Timers;
use serde::Serialize;
use sg_adapters::{ArchiveAdapter, CatalogAdapter, NotifyAdapter};
use sg_core::{
    default_catalog, Clock, FlowConfig, RetryPolicy, RunEvent, RunId, RunState, RunStatus,
    StageKind, StageSpec, StageStatus, VersionId,
};
use tracing::Instrument;

/// Message of a run that passed every stage
pub const COMPLETED_MESSAGE: &str = "upgrade flow completed";

/// Input of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub version_id: VersionId,
    pub version_name: String,
    pub item_ids: Vec<String>,
    /// Empty selects the catalog source's default flow
    pub flow_config_id: String,
}

impl RunRequest {
    pub fn new(version_id: impl Into<VersionId>) -> Self {
        Self {
            version_id: version_id.into(),
            version_name: String::new(),
            item_ids: Vec::new(),
            flow_config_id: String::new(),
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            version_name: name.into(),
            ..self
        }
    }

    pub fn with_items(self, item_ids: Vec<String>) -> Self {
        Self { item_ids, ..self }
    }

    pub fn with_flow(self, flow_config_id: impl Into<String>) -> Self {
        Self {
            flow_config_id: flow_config_id.into(),
            ..self
        }
    }

    pub fn run_id(&self) -> RunId {
        RunId::for_version(self.version_id.clone())
    }

    /// Name used in notifications, falling back to the version id
    pub fn display_name(&self) -> &str {
        if self.version_name.is_empty() {
            self.version_id.as_str()
        } else {
            &self.version_name
        }
    }
}

/// Terminal result of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub run_id: RunId,
    pub status: RunStatus,
    pub message: String,
    pub state: RunState,
}

/// Everything one run owns: its inbox, timers and observable record
pub struct RunContext<C: Clock> {
    pub inbox: Inbox,
    pub timers: Timers<C>,
    pub handle: RunHandle,
}

impl<C: Clock> RunContext<C> {
    /// Fresh context for `request`, plus the sender that feeds its inbox
    pub fn for_request(request: &RunRequest, clock: C) -> (SignalSender, Self) {
        let (tx, inbox) = inbox();
        let handle = RunHandle::new(
            request.run_id(),
            RunState::new(request.version_id.clone(), request.item_ids.clone()),
        );
        (
            tx,
            Self {
                inbox,
                timers: Timers::new(clock),
                handle,
            },
        )
    }
}

#[derive(Clone)]
pub struct Orchestrator<K, N, A> {
    catalog: K,
    notify: N,
    archive: A,
    config: EngineConfig,
}

impl<K, N, A> Orchestrator<K, N, A>
where
    K: CatalogAdapter,
    N: NotifyAdapter,
    A: ArchiveAdapter,
{
    pub fn new(deps: RuntimeDeps<K, N, A>, config: EngineConfig) -> Self {
        Self {
            catalog: deps.catalog,
            notify: deps.notify,
            archive: deps.archive,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve a flow config, substituting the built-in catalog on any
    /// lookup failure.
    pub async fn fetch_catalog(&self, config_id: &str) -> FlowConfig {
        let policy = RetryPolicy {
            max_attempts: 1,
            ..self.config.activity.clone()
        };
        let result = activity::execute_recoverable("fetch_stage_catalog", &policy, |_| {
            self.catalog.fetch(config_id)
        })
        .await;

        match result {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(config_id, error = %e, "flow config unavailable, using default catalog");
                default_catalog()
            }
        }
    }

    /// Drive one run to its end.
    ///
    /// A failed test ends the run as `Failed` without an error. Gate errors
    /// and an exhausted archive activity fail the run and are returned.
    pub async fn run<C: Clock>(
        &self,
        request: RunRequest,
        ctx: RunContext<C>,
    ) -> Result<RunOutcome, FlowError> {
        let RunContext {
            mut inbox,
            timers,
            handle,
        } = ctx;
        let span = tracing::info_span!(
            "run",
            run_id = %handle.run_id(),
            version = %request.version_id
        );

        async move {
            tracing::info!(
                flow = %request.flow_config_id,
                items = request.item_ids.len(),
                "run started"
            );

            let catalog = self.fetch_catalog(&request.flow_config_id).await;
            handle.set_catalog(catalog.clone());
            let mut gates = Gates::new(&mut inbox, &timers, &handle);

            for stage in catalog.stages() {
                if !stage.enabled {
                    tracing::info!(stage = %stage.key, "stage disabled, skipping");
                    handle.record(RunEvent::StageSkipped {
                        stage: stage.key.clone(),
                    });
                    continue;
                }

                handle.record(RunEvent::StageEntered {
                    stage: stage.key.clone(),
                });
                self.notify_stage_entered(&request, stage);

                let stage_span =
                    tracing::info_span!("stage", stage = %stage.key, kind = %stage.kind);
                let result = self.run_stage(&mut gates, stage).instrument(stage_span).await;

                match result {
                    Ok(status) if status.is_success() => {
                        handle.record(RunEvent::StageResolved {
                            stage: stage.key.clone(),
                            status,
                        });
                    }
                    Ok(status) => {
                        handle.record(RunEvent::StageResolved {
                            stage: stage.key.clone(),
                            status,
                        });
                        let message = format!("{} did not pass", stage.name);
                        tracing::warn!(stage = %stage.key, "{message}");
                        handle.record(RunEvent::Failed {
                            reason: message.clone(),
                        });
                        return Ok(outcome(&handle, message));
                    }
                    Err(e) => {
                        let status = match &e {
                            FlowError::StageRejected { .. } => StageStatus::Rejected,
                            FlowError::StageTimeout { .. } | FlowError::ActivityFailed { .. } => {
                                StageStatus::TimedOut
                            }
                        };
                        handle.record(RunEvent::StageResolved {
                            stage: stage.key.clone(),
                            status,
                        });
                        let message = format!("{} failed: {}", stage.name, e);
                        tracing::error!(stage = %stage.key, error = %e, "run failed");
                        handle.record(RunEvent::Failed { reason: message });
                        return Err(e);
                    }
                }
            }

            handle.record(RunEvent::AllStagesPassed);

            let archived = activity::execute("archive_run", &self.config.activity, |_| {
                self.archive.archive(&request.version_id)
            })
            .await;
            if let Err(e) = archived {
                tracing::error!(error = %e, "archive failed");
                handle.record(RunEvent::Failed {
                    reason: format!("archive failed: {e}"),
                });
                return Err(e);
            }

            handle.record(RunEvent::Completed);
            tracing::info!("{COMPLETED_MESSAGE}");
            Ok(outcome(&handle, COMPLETED_MESSAGE.to_string()))
        }
        .instrument(span)
        .await
    }

    async fn run_stage<C: Clock>(
        &self,
        gates: &mut Gates<'_, C>,
        stage: &StageSpec,
    ) -> Result<StageStatus, FlowError> {
        match stage.kind {
            StageKind::Approval | StageKind::Prepare if stage.auto_pass => {
                gates.approval_auto_pass(stage).await
            }
            StageKind::Approval | StageKind::Prepare => gates.approval(stage).await,
            StageKind::Test => {
                let passed = gates.test(stage, self.config.gates.test_timeout).await?;
                Ok(if passed {
                    StageStatus::Passed
                } else {
                    StageStatus::TestFailed
                })
            }
        }
    }

    /// Fire-and-forget: retried in its own task, failure only logged
    fn notify_stage_entered(&self, request: &RunRequest, stage: &StageSpec) {
        let message = format!(
            "version {} entered stage {}",
            request.display_name(),
            stage.name
        );
        let notify = self.notify.clone();
        let policy = self.config.activity.clone();

        tokio::spawn(
            async move {
                let result = activity::execute("notify", &policy, |_| {
                    let notify = notify.clone();
                    let message = message.clone();
                    async move { notify.notify(&message).await }
                })
                .await;
                if let Err(e) = result {
                    tracing::warn!(error = %e, "notification dropped");
                }
            }
            .in_current_span(),
        );
    }
}

fn outcome(handle: &RunHandle, message: String) -> RunOutcome {
    let state = handle.state();
    RunOutcome {
        run_id: handle.run_id().clone(),
        status: state.status,
        message,
        state,
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
