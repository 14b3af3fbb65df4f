// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! IAM scope (tenant / business partition).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scope type for resources that live outside any business.
pub const SYSTEM_SCOPE_TYPE: &str = "system";
/// Scope id paired with [`SYSTEM_SCOPE_TYPE`].
pub const SYSTEM_SCOPE_ID: &str = "bk_cmdb";
/// Scope type for business-owned resources.
pub const BIZ_SCOPE_TYPE: &str = "biz";

/// A `(scope_type, scope_id)` pair naming a partition within IAM.
///
/// Displays as `scope_type:scope_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub scope_type: String,
    pub scope_id: String,
}

impl Scope {
    pub fn new(scope_type: impl Into<String>, scope_id: impl Into<String>) -> Self {
        Self { scope_type: scope_type.into(), scope_id: scope_id.into() }
    }

    /// The global system scope.
    pub fn system() -> Self {
        Self::new(SYSTEM_SCOPE_TYPE, SYSTEM_SCOPE_ID)
    }

    /// Scope of a single business.
    pub fn business(biz_id: i64) -> Self {
        Self::new(BIZ_SCOPE_TYPE, biz_id.to_string())
    }

    /// True when neither half has been set.
    pub fn is_empty(&self) -> bool {
        self.scope_type.is_empty() && self.scope_id.is_empty()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope_type, self.scope_id)
    }
}
