// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CMDB side: what should exist in IAM, grouped into jobs.

use crate::job::SyncJob;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerateError {
    #[error("cmdb query failed: {0}")]
    Query(String),
}

/// Source of the jobs for one tick.
#[async_trait]
pub trait Enumerator: Send + Sync + 'static {
    async fn jobs(&self) -> Result<Vec<SyncJob>, EnumerateError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{EnumerateError, Enumerator};
    use crate::job::SyncJob;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeEnumeratorState {
        jobs: Vec<SyncJob>,
        error: Option<EnumerateError>,
        calls: usize,
    }

    /// Enumerator returning a fixed job list
    #[derive(Clone, Default)]
    pub struct FakeEnumerator {
        inner: Arc<Mutex<FakeEnumeratorState>>,
    }

    impl FakeEnumerator {
        pub fn new(jobs: Vec<SyncJob>) -> Self {
            let fake = Self::default();
            fake.inner.lock().jobs = jobs;
            fake
        }

        pub fn set_jobs(&self, jobs: Vec<SyncJob>) {
            self.inner.lock().jobs = jobs;
        }

        /// Fail every call until cleared with `None`.
        pub fn set_error(&self, error: Option<EnumerateError>) {
            self.inner.lock().error = error;
        }

        pub fn calls(&self) -> usize {
            self.inner.lock().calls
        }
    }

    #[async_trait]
    impl Enumerator for FakeEnumerator {
        async fn jobs(&self) -> Result<Vec<SyncJob>, EnumerateError> {
            let mut state = self.inner.lock();
            state.calls += 1;
            match &state.error {
                Some(e) => Err(e.clone()),
                None => Ok(state.jobs.clone()),
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeEnumerator;
