// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One reconciliation unit as handed out by an [`Enumerator`](crate::Enumerator).

use authsync_adapters::IamAdapter;
use authsync_core::{BackendResource, DesiredResource, RequestHeader, SearchCondition};
use authsync_engine::{Reconciler, SyncError, SyncOutcome};

/// Where a job's IAM-side resources come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteSource {
    /// List by the type and scope of a template resource.
    Attribute(DesiredResource),
    /// Raw search with forwarded headers.
    Condition { header: RequestHeader, condition: SearchCondition },
    /// Already fetched by the caller.
    Cached(Vec<BackendResource>),
}

impl RemoteSource {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Attribute(_) => "attribute",
            Self::Condition { .. } => "condition",
            Self::Cached(_) => "cached",
        }
    }
}

/// Desired state for one IAM id prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncJob {
    pub name: String,
    pub source: RemoteSource,
    pub iam_id_prefix: String,
    pub desired: Vec<DesiredResource>,
    pub skip_deregister: bool,
}

impl SyncJob {
    pub fn new(
        name: impl Into<String>,
        source: RemoteSource,
        iam_id_prefix: impl Into<String>,
        desired: Vec<DesiredResource>,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            iam_id_prefix: iam_id_prefix.into(),
            desired,
            skip_deregister: false,
        }
    }

    authsync_core::setters! {
        set { skip_deregister: bool }
    }

    /// Run through the entry point matching the job's source.
    ///
    /// `force_skip_deregister` overrides the job's own flag when set.
    pub async fn run<I: IamAdapter>(
        &self,
        reconciler: &Reconciler<I>,
        force_skip_deregister: bool,
    ) -> Result<SyncOutcome, SyncError> {
        let skip = self.skip_deregister || force_skip_deregister;
        let prefix = self.iam_id_prefix.as_str();
        match &self.source {
            RemoteSource::Attribute(attribute) => {
                reconciler.diff_and_sync(&self.name, attribute, prefix, &self.desired, skip).await
            }
            RemoteSource::Condition { header, condition } => {
                let mut header = header.clone();
                header.ensure_request_id();
                reconciler
                    .diff_and_sync_instances(
                        &header,
                        &self.name,
                        condition,
                        prefix,
                        &self.desired,
                        skip,
                    )
                    .await
            }
            RemoteSource::Cached(remote) => {
                reconciler
                    .diff_and_sync_core(&self.name, remote.clone(), prefix, &self.desired, skip)
                    .await
            }
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
