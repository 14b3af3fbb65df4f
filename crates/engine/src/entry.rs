// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task entry points: fetch the remote set, then reconcile.

use crate::error::SyncError;
use crate::outcome::SyncOutcome;
use crate::reconciler::Reconciler;
use authsync_adapters::IamAdapter;
use authsync_core::{DesiredResource, RequestHeader, SearchCondition};
use tracing::{debug, error};

impl<I: IamAdapter> Reconciler<I> {
    /// Reconcile the resources IAM lists for `attribute`'s type and scope.
    pub async fn diff_and_sync(
        &self,
        task: &str,
        attribute: &DesiredResource,
        iam_id_prefix: &str,
        desired: &[DesiredResource],
        skip_deregister: bool,
    ) -> Result<SyncOutcome, SyncError> {
        let remote = self.iam.list_by_attribute(attribute).await.map_err(|e| {
            error!(task, error = %e, "synchronize failed, list resources from iam failed");
            SyncError::ListRemote(e)
        })?;
        debug!(task, count = remote.len(), "listed iam resources by attribute");
        self.diff_and_sync_core(task, remote, iam_id_prefix, desired, skip_deregister).await
    }

    /// Reconcile the resources a raw IAM search returns.
    pub async fn diff_and_sync_instances(
        &self,
        header: &RequestHeader,
        task: &str,
        condition: &SearchCondition,
        iam_id_prefix: &str,
        desired: &[DesiredResource],
        skip_deregister: bool,
    ) -> Result<SyncOutcome, SyncError> {
        let remote = self.iam.list_by_condition(header, condition).await.map_err(|e| {
            error!(
                task,
                rid = header.request_id().unwrap_or_default(),
                error = %e,
                "synchronize failed, raw list resources from iam failed"
            );
            SyncError::ListRemote(e)
        })?;
        debug!(task, count = remote.len(), "listed iam resources by condition");
        self.diff_and_sync_core(task, remote, iam_id_prefix, desired, skip_deregister).await
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
