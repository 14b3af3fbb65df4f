// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! authsync-core: resource model and keying shared by the reconciliation crates

pub mod macros;

pub mod key;
pub mod query;
pub mod resource;
pub mod scope;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use key::Key;
pub use query::{RequestHeader, SearchCondition};
#[cfg(any(test, feature = "test-support"))]
pub use resource::DesiredResourceBuilder;
pub use resource::{
    BackendResource, CanonicalResource, DesiredResource, DryRunResult, Layer, PathItem,
    ResourceIdSegment, ResourceType,
};
pub use scope::Scope;
