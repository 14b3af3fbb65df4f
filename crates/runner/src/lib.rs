// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! authsync-runner: periodic host for CMDB → IAM reconciliation
//!
//! Each tick asks the [`Enumerator`] for the jobs to run, groups them by
//! IAM id prefix, and reconciles the groups in parallel. Jobs sharing a
//! prefix run one after another.

pub mod enumerator;
pub mod env;
pub mod job;
pub mod logging;
mod runner;

pub use enumerator::{EnumerateError, Enumerator};
pub use env::RunnerConfig;
pub use job::{RemoteSource, SyncJob};
pub use logging::LoggingError;
pub use runner::{Runner, TickSummary};

#[cfg(any(test, feature = "test-support"))]
pub use enumerator::FakeEnumerator;
