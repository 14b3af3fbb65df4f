// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! authsync-engine: existence reconciliation between CMDB and IAM

mod entry;
mod error;
mod outcome;
mod reconciler;

pub use error::SyncError;
pub use outcome::{DeregisterGate, SkipReason, SyncOutcome, SyncReport};
pub use reconciler::Reconciler;
