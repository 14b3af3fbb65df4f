// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic reconciliation loop.

use crate::enumerator::{EnumerateError, Enumerator};
use crate::env::RunnerConfig;
use crate::job::SyncJob;
use authsync_adapters::IamAdapter;
use authsync_engine::{Reconciler, SyncError, SyncOutcome};
use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Job results for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub applied: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl TickSummary {
    pub fn total(&self) -> usize {
        self.applied + self.skipped + self.failed
    }

    fn record(&mut self, result: &Result<SyncOutcome, SyncError>) {
        match result {
            Ok(SyncOutcome::Applied(_)) => self.applied += 1,
            Ok(SyncOutcome::Skipped(_)) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }

    fn merge(&mut self, other: TickSummary) {
        self.applied += other.applied;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

pub struct Runner<I, E> {
    reconciler: Arc<Reconciler<I>>,
    enumerator: E,
    config: RunnerConfig,
}

impl<I: IamAdapter, E: Enumerator> Runner<I, E> {
    pub fn new(iam: I, enumerator: E, config: RunnerConfig) -> Self {
        Self { reconciler: Arc::new(Reconciler::new(iam)), enumerator, config }
    }

    pub fn reconciler(&self) -> &Reconciler<I> {
        &self.reconciler
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Tick until `token` is cancelled. An in-flight tick is dropped on cancel.
    pub async fn run(&self, token: CancellationToken) {
        let mut interval = tokio::time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval = ?self.config.interval, concurrency = self.config.concurrency, "runner started");

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = interval.tick() => {}
            }
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => break,
                result = self.run_once() => result,
            };
            match result {
                Ok(summary) => info!(
                    applied = summary.applied,
                    skipped = summary.skipped,
                    failed = summary.failed,
                    "tick finished"
                ),
                Err(e) => warn!(error = %e, "enumerate jobs failed, skipping tick"),
            }
        }
        info!("runner stopped");
    }

    /// Enumerate and run every job once.
    ///
    /// Jobs sharing an IAM id prefix run in order within one task; distinct
    /// prefixes run in parallel, at most `concurrency` at a time.
    pub async fn run_once(&self) -> Result<TickSummary, EnumerateError> {
        let jobs = self.enumerator.jobs().await?;
        let groups = group_by_prefix(jobs);
        debug!(groups = groups.len(), "enumerated jobs");

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let force_skip = self.config.skip_deregister;
        let mut tasks = JoinSet::new();
        for (prefix, jobs) in groups {
            let reconciler = Arc::clone(&self.reconciler);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                run_group_limited(semaphore, &reconciler, &prefix, jobs, force_skip).await
            });
        }

        let mut summary = TickSummary::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(group) => summary.merge(group),
                Err(e) => {
                    error!(error = %e, "reconcile task aborted");
                    summary.failed += 1;
                }
            }
        }
        Ok(summary)
    }
}

fn group_by_prefix(jobs: Vec<SyncJob>) -> IndexMap<String, Vec<SyncJob>> {
    let mut groups: IndexMap<String, Vec<SyncJob>> = IndexMap::new();
    for job in jobs {
        groups.entry(job.iam_id_prefix.clone()).or_default().push(job);
    }
    groups
}

/// Wait for a permit, then run the group. A closed limiter fails every job
/// of the group without touching IAM.
async fn run_group_limited<I: IamAdapter>(
    semaphore: Arc<Semaphore>,
    reconciler: &Reconciler<I>,
    prefix: &str,
    jobs: Vec<SyncJob>,
    force_skip: bool,
) -> TickSummary {
    let Ok(_permit) = semaphore.acquire_owned().await else {
        error!(prefix, jobs = jobs.len(), "concurrency limiter closed, group not run");
        return TickSummary { failed: jobs.len(), ..TickSummary::default() };
    };
    run_group(reconciler, prefix, jobs, force_skip).await
}

async fn run_group<I: IamAdapter>(
    reconciler: &Reconciler<I>,
    prefix: &str,
    jobs: Vec<SyncJob>,
    force_skip: bool,
) -> TickSummary {
    let mut summary = TickSummary::default();
    for job in jobs {
        let result = job.run(reconciler, force_skip).await;
        summary.record(&result);
        match result {
            Ok(SyncOutcome::Applied(report)) => debug!(
                job = %job.name,
                prefix,
                source = job.source.kind(),
                registered = report.registered,
                deregistered = report.deregistered,
                matched = report.matched,
                "job applied"
            ),
            Ok(SyncOutcome::Skipped(reason)) => {
                info!(job = %job.name, prefix, %reason, "job skipped")
            }
            Err(e) if e.is_cancelled() => {
                warn!(job = %job.name, prefix, "job cancelled, abandoning group");
                break;
            }
            Err(e) => error!(job = %job.name, prefix, error = %e, "job failed"),
        }
    }
    summary
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
