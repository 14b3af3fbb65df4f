// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use authsync_adapters::IamError;
use thiserror::Error;

/// Failures a reconciliation propagates to its caller.
///
/// Everything else (failed batch dry-run, register and deregister errors,
/// ambiguous items) is absorbed into the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("get iam resources failed: {0}")]
    ListRemote(#[source] IamError),
    #[error("dry run result in unexpected nil")]
    UnexpectedNil,
    #[error("dry run register resource failed for instance {instance_id}: {source}")]
    DryRunItem {
        instance_id: String,
        #[source]
        source: IamError,
    },
}

impl SyncError {
    /// True when the failure was an aborted call rather than a real error.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            SyncError::ListRemote(IamError::Cancelled)
                | SyncError::DryRunItem { source: IamError::Cancelled, .. }
        )
    }
}
