// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cancellation for in-flight IAM calls.

use super::{IamAdapter, IamError};
use async_trait::async_trait;
use authsync_core::{
    BackendResource, DesiredResource, DryRunResult, RequestHeader, ResourceType, Scope,
    SearchCondition,
};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Wraps an adapter so every call aborts with [`IamError::Cancelled`] once
/// the token is cancelled. A call that already completed is not undone.
#[derive(Clone)]
pub struct CancellableIam<A> {
    inner: A,
    token: CancellationToken,
}

impl<A: IamAdapter> CancellableIam<A> {
    pub fn new(inner: A, token: CancellationToken) -> Self {
        Self { inner, token }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    async fn guard<T>(
        &self,
        op: &'static str,
        call: impl Future<Output = Result<T, IamError>> + Send,
    ) -> Result<T, IamError> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                tracing::debug!(op, "iam call aborted by cancellation");
                Err(IamError::Cancelled)
            }
            result = call => result,
        }
    }
}

#[async_trait]
impl<A: IamAdapter> IamAdapter for CancellableIam<A> {
    async fn list_by_attribute(
        &self,
        attribute: &DesiredResource,
    ) -> Result<Vec<BackendResource>, IamError> {
        self.guard("list_by_attribute", self.inner.list_by_attribute(attribute)).await
    }

    async fn list_by_condition(
        &self,
        header: &RequestHeader,
        condition: &SearchCondition,
    ) -> Result<Vec<BackendResource>, IamError> {
        self.guard("list_by_condition", self.inner.list_by_condition(header, condition)).await
    }

    async fn dry_run(&self, resources: &[DesiredResource]) -> Result<Option<DryRunResult>, IamError> {
        self.guard("dry_run", self.inner.dry_run(resources)).await
    }

    async fn register(&self, resources: &[DesiredResource]) -> Result<(), IamError> {
        self.guard("register", self.inner.register(resources)).await
    }

    async fn deregister(&self, scope: &Scope, resources: &[BackendResource]) -> Result<(), IamError> {
        self.guard("deregister", self.inner.deregister(scope, resources)).await
    }

    fn is_related_to_resource_id(&self, resource_type: &ResourceType) -> bool {
        self.inner.is_related_to_resource_id(resource_type)
    }
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod tests;
