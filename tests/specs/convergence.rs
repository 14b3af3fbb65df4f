// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Convergence specs
//!
//! IAM follows CMDB across ticks, and a converged world stays quiet.

use crate::prelude::*;

#[tokio::test]
async fn first_tick_registers_every_cmdb_host() {
    let mut world = World::new(1);
    world.set_hosts(1, &["1", "2", "3"]);

    let summary = world.runner().run_once().await.unwrap();

    assert_eq!(summary, TickSummary { applied: 1, skipped: 0, failed: 0 });
    assert_eq!(world.iam_hosts(), vec!["cmdb:biz:1:1", "cmdb:biz:1:2", "cmdb:biz:1:3"]);
}

#[tokio::test]
async fn converged_world_issues_no_side_effects() {
    let mut world = World::new(1);
    world.set_hosts(1, &["1", "2"]);
    let runner = world.runner();
    runner.run_once().await.unwrap();
    world.iam.clear_calls();

    runner.run_once().await.unwrap();

    assert!(world.iam.registers().is_empty());
    assert!(world.iam.deregisters().is_empty());
}

#[tokio::test]
async fn removed_cmdb_host_is_deregistered_next_tick() {
    let mut world = World::new(1);
    world.set_hosts(1, &["1", "2", "3"]);
    let runner = world.runner();
    runner.run_once().await.unwrap();

    world.set_hosts(1, &["1", "3", "4"]);
    runner.run_once().await.unwrap();

    assert_eq!(world.iam_hosts(), vec!["cmdb:biz:1:1", "cmdb:biz:1:3", "cmdb:biz:1:4"]);
}

#[tokio::test]
async fn foreign_prefix_records_survive() {
    let mut world = World::new(1);
    let foreign = authsync_core::test_support::backend(&[("biz", "1"), ("host", "legacy:7")]);
    world.iam.seed(Scope::business(1), foreign.clone());
    world.set_hosts(1, &["1"]);

    world.runner().run_once().await.unwrap();

    assert!(world.iam.keys().contains(&Key::from_backend(&foreign)));
}
