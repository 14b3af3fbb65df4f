// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Safety specs
//!
//! Conditions under which the runner must leave IAM untouched.

use crate::prelude::*;

async fn converged(ids: &[&str]) -> World {
    let mut world = World::new(1);
    world.set_hosts(1, ids);
    world.runner().run_once().await.unwrap();
    world.iam.clear_calls();
    world
}

#[tokio::test]
async fn emptied_cmdb_category_keeps_iam_intact() {
    let mut world = converged(&["1", "2"]).await;
    world.set_hosts(1, &[]);

    let summary = world.runner().run_once().await.unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(world.iam_hosts(), vec!["cmdb:biz:1:1", "cmdb:biz:1:2"]);
}

#[tokio::test]
async fn failing_batch_dry_run_keeps_iam_intact() {
    let mut world = converged(&["1", "2"]).await;
    world.set_hosts(1, &["1"]);
    world.iam.script_dry_run(DryRunScript::Fail(IamError::Transport("reset".into())));

    let summary = world.runner().run_once().await.unwrap();

    assert_eq!(summary.skipped, 1);
    assert!(world.iam.deregisters().is_empty());
    assert_eq!(world.iam_hosts().len(), 2);
}

#[tokio::test]
async fn id_correlated_type_keeps_iam_intact() {
    let mut world = converged(&["1", "2"]).await;
    world.iam.set_related_to_resource_id("host");
    world.set_hosts(1, &["3"]);

    world.runner().run_once().await.unwrap();

    assert!(world.iam.registers().is_empty());
    assert!(world.iam.deregisters().is_empty());
}

#[tokio::test]
async fn unnormalizable_hosts_never_trigger_mass_deregister() {
    let mut world = converged(&["1", "2"]).await;
    world.iam.set_ambiguous("9");
    world.set_hosts(1, &["9"]);

    world.runner().run_once().await.unwrap();

    assert!(world.iam.deregisters().is_empty());
    assert_eq!(world.iam_hosts().len(), 2);
}

#[tokio::test]
async fn list_failure_fails_job_without_side_effects() {
    let mut world = converged(&["1"]).await;
    world.iam.fail_list(IamError::Remote { code: 1199048, message: "iam unavailable".into() });
    world.set_hosts(1, &["2"]);

    let summary = world.runner().run_once().await.unwrap();

    assert_eq!(summary.failed, 1);
    assert!(world.iam.registers().is_empty());
    assert!(world.iam.deregisters().is_empty());
}
