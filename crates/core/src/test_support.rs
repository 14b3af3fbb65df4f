// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{
    BackendResource, CanonicalResource, DesiredResource, Layer, PathItem, ResourceIdSegment,
    ResourceType, Scope,
};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for resource shapes.
pub mod strategies {
    use crate::{BackendResource, DesiredResource, Layer, PathItem, ResourceType, Scope};
    use proptest::prelude::*;

    /// Ids drawn from an alphabet without key separators, so keys never alias.
    pub fn arb_id() -> impl Strategy<Value = String> {
        "[a-z0-9_]{1,8}"
    }

    pub fn arb_resource_type() -> impl Strategy<Value = ResourceType> {
        prop_oneof![Just("biz"), Just("set"), Just("module"), Just("host")]
            .prop_map(ResourceType::from)
    }

    pub fn arb_layer() -> impl Strategy<Value = Layer> {
        (arb_resource_type(), arb_id(), arb_id()).prop_map(|(t, id, name)| Layer::new(t, id, name))
    }

    /// Non-empty layer sequences up to four deep.
    pub fn arb_backend_resource() -> impl Strategy<Value = BackendResource> {
        prop::collection::vec(arb_layer(), 1..=4).prop_map(BackendResource::new)
    }

    /// Desired hosts in business 1 with up to two ancestors.
    pub fn arb_desired() -> impl Strategy<Value = DesiredResource> {
        (prop::collection::vec((arb_resource_type(), arb_id()), 0..=2), arb_id()).prop_map(
            |(parents, id)| DesiredResource {
                resource_type: ResourceType::from("host"),
                name: format!("host-{}", id),
                instance_id: id,
                scope: Scope::business(1),
                parents: parents.into_iter().map(|(t, pid)| PathItem::new(t, pid)).collect(),
            },
        )
    }
}

// ── Factory functions ─────────────────────────────────────────────────

pub fn layer(resource_type: &str, resource_id: &str) -> Layer {
    Layer::new(resource_type, resource_id, format!("{}-{}", resource_type, resource_id))
}

/// Backend resource from `(type, id)` pairs, outermost first.
pub fn backend(pairs: &[(&str, &str)]) -> BackendResource {
    BackendResource::new(pairs.iter().map(|(t, id)| layer(t, id)).collect())
}

/// Canonical resource in `scope` from `(type, id)` pairs; the leaf type is
/// taken from the last pair.
pub fn canonical(scope: Scope, pairs: &[(&str, &str)]) -> CanonicalResource {
    let resource_type = pairs.last().map(|(t, _)| ResourceType::from(*t)).unwrap_or_default();
    CanonicalResource {
        scope,
        resource_type,
        resource_name: String::new(),
        path: pairs.iter().map(|(t, id)| ResourceIdSegment::new(*t, *id)).collect(),
    }
}

/// A host under `biz:<biz_id>`.
pub fn desired_host(biz_id: i64, host_id: &str) -> DesiredResource {
    DesiredResource::builder()
        .resource_type("host")
        .instance_id(host_id)
        .name(format!("host-{}", host_id))
        .scope(Scope::business(biz_id))
        .parents(vec![PathItem::new("biz", biz_id.to_string())])
        .build()
}
