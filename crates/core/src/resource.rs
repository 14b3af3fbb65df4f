// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource shapes on both sides of a reconciliation.
//!
//! - [`DesiredResource`] is what the CMDB says should exist.
//! - [`BackendResource`] is what IAM currently stores: a layered path whose
//!   last layer (the leaf) is the resource itself.
//! - [`CanonicalResource`] is the IAM-shaped projection of a desired resource,
//!   produced by a side-effect-free dry run.

use crate::scope::Scope;
use serde::{Deserialize, Serialize};

crate::define_name! {
    /// IAM resource type name (e.g. `host`, `biz`, `set`).
    pub struct ResourceType;
}

/// One ancestor in a desired resource's attribute path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathItem {
    pub resource_type: ResourceType,
    pub instance_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl PathItem {
    pub fn new(resource_type: impl Into<ResourceType>, instance_id: impl Into<String>) -> Self {
        Self { resource_type: resource_type.into(), instance_id: instance_id.into(), name: String::new() }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A logical entity the CMDB asserts should exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredResource {
    pub resource_type: ResourceType,
    pub name: String,
    pub instance_id: String,
    pub scope: Scope,
    /// Ancestors, outermost first. Does not include the resource itself.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<PathItem>,
}

crate::builder! {
    pub struct DesiredResourceBuilder => DesiredResource {
        into {
            resource_type: ResourceType = "host",
            name: String = "host-1",
            instance_id: String = "1",
        }
        set {
            scope: Scope = Scope::business(1),
            parents: Vec<PathItem> = Vec::new(),
        }
    }
}

impl DesiredResource {
    pub fn new(
        resource_type: impl Into<ResourceType>,
        instance_id: impl Into<String>,
        name: impl Into<String>,
        scope: Scope,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            instance_id: instance_id.into(),
            scope,
            parents: Vec::new(),
        }
    }

    /// Append an ancestor (outermost first).
    pub fn with_parent(mut self, parent: PathItem) -> Self {
        self.parents.push(parent);
        self
    }

    /// The full attribute path: ancestors followed by the resource itself.
    pub fn path(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.parents
            .iter()
            .map(|p| (p.resource_type.as_str(), p.instance_id.as_str()))
            .chain(std::iter::once((self.resource_type.as_str(), self.instance_id.as_str())))
    }
}

/// One layer of an IAM-side resource path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layer {
    pub resource_type: ResourceType,
    pub resource_id: String,
    #[serde(default)]
    pub resource_name: String,
}

impl Layer {
    pub fn new(
        resource_type: impl Into<ResourceType>,
        resource_id: impl Into<String>,
        resource_name: impl Into<String>,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            resource_name: resource_name.into(),
        }
    }
}

/// A resource as IAM stores it: containers first, the resource itself last.
///
/// IAM may hand back an empty layer sequence; such records never take part
/// in a reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendResource(pub Vec<Layer>);

impl BackendResource {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self(layers)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The layer naming the resource itself.
    pub fn leaf(&self) -> Option<&Layer> {
        self.0.last()
    }

    /// True when the leaf id starts with `prefix`. Always false for an empty
    /// layer sequence.
    pub fn leaf_id_starts_with(&self, prefix: &str) -> bool {
        self.leaf().is_some_and(|leaf| leaf.resource_id.starts_with(prefix))
    }
}

impl From<Vec<Layer>> for BackendResource {
    fn from(layers: Vec<Layer>) -> Self {
        Self(layers)
    }
}

/// `(type, id)` pair in a canonical resource-id path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdSegment {
    pub resource_type: ResourceType,
    pub resource_id: String,
}

impl ResourceIdSegment {
    pub fn new(resource_type: impl Into<ResourceType>, resource_id: impl Into<String>) -> Self {
        Self { resource_type: resource_type.into(), resource_id: resource_id.into() }
    }
}

/// IAM-shaped projection of one desired resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalResource {
    pub scope: Scope,
    pub resource_type: ResourceType,
    #[serde(default)]
    pub resource_name: String,
    pub path: Vec<ResourceIdSegment>,
}

/// Output of a dry-run registration: zero or one canonical per input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DryRunResult {
    pub resources: Vec<CanonicalResource>,
}

impl DryRunResult {
    pub fn new(resources: Vec<CanonicalResource>) -> Self {
        Self { resources }
    }

    /// Type of the first canonical, which stands for the whole batch.
    pub fn resource_type(&self) -> Option<&ResourceType> {
        self.resources.first().map(|r| &r.resource_type)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// The canonical, when there is exactly one.
    pub fn single(&self) -> Option<&CanonicalResource> {
        match self.resources.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
