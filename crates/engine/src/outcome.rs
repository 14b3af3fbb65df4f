// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What a reconciliation did, or why it did nothing.

use authsync_adapters::IamError;
use authsync_core::ResourceType;

/// Result of a reconciliation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The diff was computed and applied (possibly partially).
    Applied(SyncReport),
    /// A safety gate stopped the run before any side effect.
    Skipped(SkipReason),
}

impl SyncOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SyncOutcome::Applied(_))
    }

    pub fn report(&self) -> Option<&SyncReport> {
        match self {
            SyncOutcome::Applied(report) => Some(report),
            SyncOutcome::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            SyncOutcome::Skipped(reason) => Some(reason),
            SyncOutcome::Applied(_) => None,
        }
    }
}

/// Safety gates that end a reconciliation before the diff is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Normalizing the whole desired set failed; nothing is known to be safe.
    BatchDryRunFailed(IamError),
    /// The desired set normalized to nothing.
    NoCanonicalResources,
    /// Permissions for this type are bound by id, not by existence.
    ResourceIdCorrelated(ResourceType),
}

authsync_core::simple_display! {
    SkipReason {
        BatchDryRunFailed(..) => "batch dry run failed",
        NoCanonicalResources => "no canonical resources",
        ResourceIdCorrelated(..) => "resource type is id-correlated",
    }
}

/// Why the deregister half of an applied reconciliation did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeregisterGate {
    /// The caller asked for register-only.
    Requested,
    /// The enumerator returned no desired resources.
    EmptyDesired,
}

authsync_core::simple_display! {
    DeregisterGate {
        Requested => "skip requested",
        EmptyDesired => "empty desired set",
    }
}

/// Counts and swallowed errors of an applied reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Resources sent to `register` (zero when the call failed).
    pub registered: usize,
    /// Resources sent to `deregister` (zero when the call failed).
    pub deregistered: usize,
    /// Desired resources already present in IAM.
    pub matched: usize,
    /// Desired resources skipped because they did not normalize to exactly one canonical.
    pub ambiguous: usize,
    pub register_error: Option<IamError>,
    pub deregister_error: Option<IamError>,
    pub deregister_gate: Option<DeregisterGate>,
}

impl SyncReport {
    /// True when neither a register nor a deregister call failed.
    pub fn is_clean(&self) -> bool {
        self.register_error.is_none() && self.deregister_error.is_none()
    }
}
