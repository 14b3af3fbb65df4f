// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory IAM for tests.
//!
//! Truthful by default: `register` and `deregister` mutate the stored
//! records, so a second reconciliation over the same inputs sees the result
//! of the first. Failures are opt-in.

use super::{IamAdapter, IamError};
use async_trait::async_trait;
use authsync_core::{
    BackendResource, CanonicalResource, DesiredResource, DryRunResult, Key, Layer, RequestHeader,
    ResourceIdSegment, ResourceType, Scope, SearchCondition,
};
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// Recorded IAM call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IamCall {
    ListByAttribute { resource_type: ResourceType, scope: Scope },
    ListByCondition { condition: SearchCondition, request_id: Option<String> },
    DryRun { instance_ids: Vec<String> },
    Register { instance_ids: Vec<String> },
    Deregister { scope: Scope, keys: Vec<Key> },
}

/// Scripted answer for the next `dry_run` call.
#[derive(Debug, Clone)]
pub enum DryRunScript {
    /// Normalize as usual.
    Passthrough,
    /// Fail with this error.
    Fail(IamError),
    /// Answer with no result structure.
    Nil,
}

#[derive(Default)]
struct FakeIamState {
    records: Vec<(Scope, BackendResource)>,
    calls: Vec<IamCall>,
    related_types: HashSet<ResourceType>,
    dry_run_script: VecDeque<DryRunScript>,
    ambiguous: HashSet<String>,
    duplicated: HashSet<String>,
    leaf_prefix: String,
    list_error: Option<IamError>,
    register_error: Option<IamError>,
    deregister_error: Option<IamError>,
}

/// Fake IAM adapter for testing
#[derive(Clone, Default)]
pub struct FakeIamAdapter {
    inner: Arc<Mutex<FakeIamState>>,
}

impl FakeIamAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical leaf ids become `prefix + instance_id`.
    pub fn with_leaf_prefix(self, prefix: impl Into<String>) -> Self {
        self.inner.lock().leaf_prefix = prefix.into();
        self
    }

    /// Store a record as if IAM already held it.
    pub fn seed(&self, scope: Scope, resource: BackendResource) {
        self.inner.lock().records.push((scope, resource));
    }

    /// Mark a resource type as id-correlated.
    pub fn set_related_to_resource_id(&self, resource_type: impl Into<ResourceType>) {
        self.inner.lock().related_types.insert(resource_type.into());
    }

    /// Queue an answer for the next `dry_run` call; unscripted calls pass through.
    pub fn script_dry_run(&self, script: DryRunScript) {
        self.inner.lock().dry_run_script.push_back(script);
    }

    /// Instances that normalize to no canonical at all.
    pub fn set_ambiguous(&self, instance_id: impl Into<String>) {
        self.inner.lock().ambiguous.insert(instance_id.into());
    }

    /// Instances that normalize to two canonicals.
    pub fn set_duplicated(&self, instance_id: impl Into<String>) {
        self.inner.lock().duplicated.insert(instance_id.into());
    }

    pub fn fail_list(&self, error: IamError) {
        self.inner.lock().list_error = Some(error);
    }

    pub fn fail_register(&self, error: IamError) {
        self.inner.lock().register_error = Some(error);
    }

    pub fn fail_deregister(&self, error: IamError) {
        self.inner.lock().deregister_error = Some(error);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<IamCall> {
        self.inner.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }

    /// Instance id batches passed to `register`, one entry per call.
    pub fn registers(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                IamCall::Register { instance_ids } => Some(instance_ids),
                _ => None,
            })
            .collect()
    }

    /// `(scope, keys)` passed to `deregister`, one entry per call.
    pub fn deregisters(&self) -> Vec<(Scope, Vec<Key>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                IamCall::Deregister { scope, keys } => Some((scope, keys)),
                _ => None,
            })
            .collect()
    }

    /// Keys of every stored record, in storage order.
    pub fn keys(&self) -> Vec<Key> {
        self.inner.lock().records.iter().map(|(_, r)| Key::from_backend(r)).collect()
    }

    /// Normalize one desired resource under the fake's rules.
    fn canonicals(state: &FakeIamState, desired: &DesiredResource) -> Vec<CanonicalResource> {
        if state.ambiguous.contains(&desired.instance_id) {
            return Vec::new();
        }
        let mut path: Vec<ResourceIdSegment> =
            desired.path().map(|(t, id)| ResourceIdSegment::new(t, id)).collect();
        if let Some(leaf) = path.last_mut() {
            leaf.resource_id = format!("{}{}", state.leaf_prefix, desired.instance_id);
        }
        let canonical = CanonicalResource {
            scope: desired.scope.clone(),
            resource_type: desired.resource_type.clone(),
            resource_name: desired.name.clone(),
            path,
        };
        if state.duplicated.contains(&desired.instance_id) {
            vec![canonical.clone(), canonical]
        } else {
            vec![canonical]
        }
    }

    fn to_backend(desired: &DesiredResource, canonical: &CanonicalResource) -> BackendResource {
        let names = desired.parents.iter().map(|p| p.name.as_str()).chain([desired.name.as_str()]);
        BackendResource::new(
            canonical
                .path
                .iter()
                .zip(names)
                .map(|(seg, name)| Layer::new(seg.resource_type.clone(), seg.resource_id.clone(), name))
                .collect(),
        )
    }
}

#[async_trait]
impl IamAdapter for FakeIamAdapter {
    async fn list_by_attribute(
        &self,
        attribute: &DesiredResource,
    ) -> Result<Vec<BackendResource>, IamError> {
        let mut state = self.inner.lock();
        state.calls.push(IamCall::ListByAttribute {
            resource_type: attribute.resource_type.clone(),
            scope: attribute.scope.clone(),
        });
        if let Some(e) = state.list_error.clone() {
            return Err(e);
        }
        Ok(state
            .records
            .iter()
            .filter(|(scope, r)| {
                *scope == attribute.scope
                    && r.leaf().map_or(true, |l| l.resource_type == attribute.resource_type)
            })
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn list_by_condition(
        &self,
        header: &RequestHeader,
        condition: &SearchCondition,
    ) -> Result<Vec<BackendResource>, IamError> {
        let mut state = self.inner.lock();
        state.calls.push(IamCall::ListByCondition {
            condition: condition.clone(),
            request_id: header.request_id().map(str::to_string),
        });
        if let Some(e) = state.list_error.clone() {
            return Err(e);
        }
        Ok(state
            .records
            .iter()
            .filter(|(scope, r)| {
                *scope == condition.scope
                    && r.leaf().map_or(true, |l| l.resource_type == condition.resource_type)
                    && r.layers().len() > condition.parents.len()
                    && condition.parents.iter().zip(r.layers()).all(|(p, l)| {
                        p.resource_type == l.resource_type && p.resource_id == l.resource_id
                    })
            })
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn dry_run(&self, resources: &[DesiredResource]) -> Result<Option<DryRunResult>, IamError> {
        let mut state = self.inner.lock();
        state.calls.push(IamCall::DryRun {
            instance_ids: resources.iter().map(|r| r.instance_id.clone()).collect(),
        });
        match state.dry_run_script.pop_front().unwrap_or(DryRunScript::Passthrough) {
            DryRunScript::Fail(e) => Err(e),
            DryRunScript::Nil => Ok(None),
            DryRunScript::Passthrough => Ok(Some(DryRunResult::new(
                resources.iter().flat_map(|r| Self::canonicals(&state, r)).collect(),
            ))),
        }
    }

    async fn register(&self, resources: &[DesiredResource]) -> Result<(), IamError> {
        let mut state = self.inner.lock();
        state.calls.push(IamCall::Register {
            instance_ids: resources.iter().map(|r| r.instance_id.clone()).collect(),
        });
        if let Some(e) = state.register_error.clone() {
            return Err(e);
        }
        for desired in resources {
            for canonical in Self::canonicals(&state, desired) {
                let key = Key::from_canonical(&canonical);
                let exists = state
                    .records
                    .iter()
                    .any(|(scope, r)| *scope == canonical.scope && Key::from_backend(r) == key);
                if !exists {
                    let record = Self::to_backend(desired, &canonical);
                    state.records.push((canonical.scope, record));
                }
            }
        }
        Ok(())
    }

    async fn deregister(&self, scope: &Scope, resources: &[BackendResource]) -> Result<(), IamError> {
        let mut state = self.inner.lock();
        let keys: Vec<Key> = resources.iter().map(Key::from_backend).collect();
        state.calls.push(IamCall::Deregister { scope: scope.clone(), keys: keys.clone() });
        if let Some(e) = state.deregister_error.clone() {
            return Err(e);
        }
        state.records.retain(|(s, r)| !(s == scope && keys.contains(&Key::from_backend(r))));
        Ok(())
    }

    fn is_related_to_resource_id(&self, resource_type: &ResourceType) -> bool {
        self.inner.lock().related_types.contains(resource_type)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
