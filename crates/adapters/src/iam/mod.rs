// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! IAM capability surface consumed by the reconciler.
//!
//! The transport behind it (request signing, retries, pagination) belongs to
//! the concrete client; the reconciler only sees these six operations.

mod cancel;

pub use cancel::CancellableIam;

use async_trait::async_trait;
use authsync_core::{
    BackendResource, DesiredResource, DryRunResult, RequestHeader, ResourceType, Scope,
    SearchCondition,
};
use thiserror::Error;

/// Errors from IAM operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IamError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("iam returned code {code}: {message}")]
    Remote { code: i64, message: String },
    #[error("request cancelled")]
    Cancelled,
}

/// Adapter for the remote IAM resource registry.
///
/// `register` and `deregister` are idempotent upstream; callers do not retry.
#[async_trait]
pub trait IamAdapter: Clone + Send + Sync + 'static {
    /// List every resource IAM holds that matches the attribute's type and scope.
    async fn list_by_attribute(
        &self,
        attribute: &DesiredResource,
    ) -> Result<Vec<BackendResource>, IamError>;

    /// List resources with a raw search condition.
    async fn list_by_condition(
        &self,
        header: &RequestHeader,
        condition: &SearchCondition,
    ) -> Result<Vec<BackendResource>, IamError>;

    /// Project desired resources into the form IAM would store, without
    /// registering anything.
    ///
    /// `Ok(None)` means IAM answered with no result structure at all.
    async fn dry_run(&self, resources: &[DesiredResource]) -> Result<Option<DryRunResult>, IamError>;

    /// Register desired resources.
    async fn register(&self, resources: &[DesiredResource]) -> Result<(), IamError>;

    /// Remove resources from IAM within `scope`.
    async fn deregister(&self, scope: &Scope, resources: &[BackendResource]) -> Result<(), IamError>;

    /// True for types whose permissions are bound by id at grant time.
    /// Such types are never synced by existence.
    fn is_related_to_resource_id(&self, resource_type: &ResourceType) -> bool;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{DryRunScript, FakeIamAdapter, IamCall};
