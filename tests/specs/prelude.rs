// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures: a fake IAM shared by several businesses, and a CMDB
//! whose hosts can be edited between ticks.

pub use authsync_adapters::{DryRunScript, FakeIamAdapter, IamError};
pub use authsync_core::test_support::desired_host;
pub use authsync_core::{DesiredResource, Key, Scope};
pub use authsync_runner::{FakeEnumerator, RemoteSource, Runner, RunnerConfig, SyncJob, TickSummary};

use std::collections::BTreeMap;

/// IAM id prefix for hosts of `biz_id`.
pub fn prefix(biz_id: i64) -> String {
    format!("cmdb:biz:{}:", biz_id)
}

/// Fake IAM that canonicalizes host ids under their business prefix.
///
/// The fake applies one leaf prefix to every business, so worlds use a
/// single business unless a test checks prefix isolation explicitly.
pub struct World {
    pub iam: FakeIamAdapter,
    pub cmdb: FakeEnumerator,
    hosts: BTreeMap<i64, Vec<String>>,
}

impl World {
    pub fn new(biz_id: i64) -> Self {
        Self {
            iam: FakeIamAdapter::new().with_leaf_prefix(prefix(biz_id)),
            cmdb: FakeEnumerator::new(Vec::new()),
            hosts: BTreeMap::new(),
        }
    }

    /// Replace the CMDB hosts of a business.
    pub fn set_hosts(&mut self, biz_id: i64, ids: &[&str]) {
        self.hosts.insert(biz_id, ids.iter().map(|s| s.to_string()).collect());
        self.cmdb.set_jobs(self.jobs());
    }

    fn jobs(&self) -> Vec<SyncJob> {
        self.hosts
            .iter()
            .map(|(biz_id, ids)| {
                let attribute = DesiredResource::builder()
                    .instance_id("")
                    .name("")
                    .scope(Scope::business(*biz_id))
                    .build();
                SyncJob::new(
                    format!("biz-{}-hosts", biz_id),
                    RemoteSource::Attribute(attribute),
                    prefix(*biz_id),
                    ids.iter().map(|id| desired_host(*biz_id, id)).collect(),
                )
            })
            .collect()
    }

    pub fn runner(&self) -> Runner<FakeIamAdapter, FakeEnumerator> {
        Runner::new(self.iam.clone(), self.cmdb.clone(), RunnerConfig::default())
    }

    /// Leaf ids IAM currently holds, sorted.
    pub fn iam_hosts(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .iam
            .keys()
            .iter()
            .filter_map(|k| k.as_str().rsplit_once("host:").map(|(_, id)| id.to_string()))
            .collect();
        ids.sort();
        ids
    }
}
