// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Existence reconciliation.
//!
//! One call compares the resources IAM holds under an id prefix with the
//! resources the CMDB says should exist, registers what is missing and
//! deregisters what is left over. Every desired resource goes through a
//! dry-run first, so both sides are keyed in IAM's own id layout.
//!
//! Safety rules, in the order they apply:
//!
//! ```text
//! batch dry-run fails            → no side effects, Ok(Skipped)
//! batch dry-run returns nothing  → no side effects, Ok(Skipped)
//! type is id-correlated          → no side effects, Ok(Skipped)
//! item dry-run fails             → Err, after no side effects
//! register fails                 → logged, deregister still runs
//! skip_deregister / empty desired → no deregister
//! no item normalized             → deregister in the default scope
//! deregister fails               → logged, Ok(Applied)
//! ```
//!
//! At most one `register` and one `deregister` call are issued per run.

use crate::error::SyncError;
use crate::outcome::{DeregisterGate, SkipReason, SyncOutcome, SyncReport};
use authsync_adapters::IamAdapter;
use authsync_core::{BackendResource, DesiredResource, DryRunResult, Key, Scope};
use indexmap::IndexMap;
use tracing::{debug, error, info, warn};

/// Drives an [`IamAdapter`] towards the desired set.
///
/// Holds no state between runs; concurrent runs must target disjoint
/// `(scope, iam_id_prefix)` pairs.
pub struct Reconciler<I> {
    pub(crate) iam: I,
}

impl<I: IamAdapter> Reconciler<I> {
    pub fn new(iam: I) -> Self {
        Self { iam }
    }

    pub fn iam(&self) -> &I {
        &self.iam
    }

    /// Reconcile an already-fetched remote set against `desired`.
    pub async fn diff_and_sync_core(
        &self,
        task: &str,
        remote: Vec<BackendResource>,
        iam_id_prefix: &str,
        desired: &[DesiredResource],
        skip_deregister: bool,
    ) -> Result<SyncOutcome, SyncError> {
        let remote = filter_remote(remote, iam_id_prefix);
        debug!(task, prefix = iam_id_prefix, remote = ?remote, "filtered iam resources");

        let batch = match self.iam.dry_run(desired).await {
            Ok(Some(batch)) => batch,
            Ok(None) => {
                error!(task, desired = desired.len(), "dry run register resource returned nil");
                return Err(SyncError::UnexpectedNil);
            }
            Err(e) => {
                error!(task, error = %e, "dry run register resource failed, skipping sync");
                return Ok(SyncOutcome::Skipped(SkipReason::BatchDryRunFailed(e)));
            }
        };
        let Some(resource_type) = batch.resource_type() else {
            info!(task, desired = desired.len(), "no cmdb resource found, skipping sync for safety");
            return Ok(SyncOutcome::Skipped(SkipReason::NoCanonicalResources));
        };
        if self.iam.is_related_to_resource_id(resource_type) {
            info!(task, %resource_type, "resource type is related to resource id, skipping sync");
            return Ok(SyncOutcome::Skipped(SkipReason::ResourceIdCorrelated(
                resource_type.clone(),
            )));
        }

        let mut hits = HitMap::new(remote);
        let mut report = SyncReport::default();
        let mut scope = Scope::default();
        let mut to_register = Vec::new();

        for resource in desired {
            let result = self.iam.dry_run(std::slice::from_ref(resource)).await.map_err(|source| {
                error!(
                    task,
                    instance = %resource.instance_id,
                    error = %source,
                    "dry run register resource failed"
                );
                SyncError::DryRunItem { instance_id: resource.instance_id.clone(), source }
            })?;
            let Some(canonical) = result.as_ref().and_then(DryRunResult::single) else {
                warn!(
                    task,
                    instance = %resource.instance_id,
                    count = result.as_ref().map_or(0, DryRunResult::len),
                    "dry run did not yield exactly one resource, skipping instance"
                );
                report.ambiguous += 1;
                continue;
            };
            scope = canonical.scope.clone();
            if hits.hit(&Key::from_canonical(canonical)) {
                report.matched += 1;
            } else {
                to_register.push(resource.clone());
            }
        }
        debug!(task, hits = ?hits, register = to_register.len(), "classified desired resources");

        if !to_register.is_empty() {
            info!(task, count = to_register.len(), "registering resources that only exist in cmdb");
            match self.iam.register(&to_register).await {
                Ok(()) => report.registered = to_register.len(),
                Err(e) => {
                    error!(task, count = to_register.len(), error = %e, "register resources failed");
                    report.register_error = Some(e);
                }
            }
        }

        if skip_deregister {
            report.deregister_gate = Some(DeregisterGate::Requested);
            return Ok(SyncOutcome::Applied(report));
        }
        if desired.is_empty() {
            info!(task, "cmdb resource not found of current category, skip deregister for safety");
            report.deregister_gate = Some(DeregisterGate::EmptyDesired);
            return Ok(SyncOutcome::Applied(report));
        }

        let orphans = hits.into_orphans();
        if orphans.is_empty() {
            return Ok(SyncOutcome::Applied(report));
        }

        info!(task, %scope, count = orphans.len(), "deregistering resources that only exist in iam");
        match self.iam.deregister(&scope, &orphans).await {
            Ok(()) => report.deregistered = orphans.len(),
            Err(e) => {
                error!(task, count = orphans.len(), error = %e, "deregister resources failed");
                report.deregister_error = Some(e);
            }
        }
        Ok(SyncOutcome::Applied(report))
    }
}

/// Keep only records with a leaf whose id starts with `iam_id_prefix`.
fn filter_remote(
    remote: Vec<BackendResource>,
    iam_id_prefix: &str,
) -> Vec<BackendResource> {
    remote.into_iter().filter(|r| r.leaf_id_starts_with(iam_id_prefix)).collect()
}

/// Remote records by key, with the number of desired resources that hit each.
///
/// Records sharing a key collapse into one entry: the last record seen,
/// at the position of the first.
#[derive(Debug)]
struct HitMap {
    entries: IndexMap<Key, (BackendResource, usize)>,
}

impl HitMap {
    fn new(remote: Vec<BackendResource>) -> Self {
        let mut entries = IndexMap::with_capacity(remote.len());
        for resource in remote {
            entries.insert(Key::from_backend(&resource), (resource, 0));
        }
        Self { entries }
    }

    /// Count a hit on `key`; false if IAM has no such record.
    fn hit(&mut self, key: &Key) -> bool {
        match self.entries.get_mut(key) {
            Some((_, hits)) => {
                *hits += 1;
                true
            }
            None => false,
        }
    }

    /// Records nothing hit, in remote order.
    fn into_orphans(self) -> Vec<BackendResource> {
        self.entries.into_values().filter(|(_, hits)| *hits == 0).map(|(r, _)| r).collect()
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
