// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw IAM search inputs: request header and search condition.

use crate::resource::{ResourceIdSegment, ResourceType};
use crate::scope::Scope;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const HEADER_SUPPLIER_ACCOUNT: &str = "X-Supplier-Account";
pub const HEADER_USER: &str = "X-User";
pub const HEADER_REQUEST_ID: &str = "X-Request-Id";

const REQUEST_ID_PREFIX: &str = "rid-";

/// Ordered header pairs forwarded with a raw IAM search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestHeader(IndexMap<String, String>);

impl RequestHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing any previous value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn with_supplier_account(mut self, account: impl Into<String>) -> Self {
        self.insert(HEADER_SUPPLIER_ACCOUNT, account);
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.insert(HEADER_USER, user);
        self
    }

    pub fn with_request_id(mut self, rid: impl Into<String>) -> Self {
        self.insert(HEADER_REQUEST_ID, rid);
        self
    }

    pub fn supplier_account(&self) -> Option<&str> {
        self.get(HEADER_SUPPLIER_ACCOUNT)
    }

    pub fn user(&self) -> Option<&str> {
        self.get(HEADER_USER)
    }

    pub fn request_id(&self) -> Option<&str> {
        self.get(HEADER_REQUEST_ID)
    }

    /// Return the request id, generating one first if the header has none.
    pub fn ensure_request_id(&mut self) -> &str {
        let rid = self
            .0
            .entry(HEADER_REQUEST_ID.to_string())
            .or_insert_with(|| format!("{}{}", REQUEST_ID_PREFIX, nanoid::nanoid!(16)));
        rid.as_str()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw IAM search: every resource of `resource_type` in `scope` under `parents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCondition {
    pub scope: Scope,
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<ResourceIdSegment>,
}

impl SearchCondition {
    pub fn new(scope: Scope, resource_type: impl Into<ResourceType>) -> Self {
        Self { scope, resource_type: resource_type.into(), parents: Vec::new() }
    }

    pub fn with_parent(mut self, parent: ResourceIdSegment) -> Self {
        self.parents.push(parent);
        self
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
