// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shutdown specs
//!
//! A running loop stops on cancellation and runs no tick afterwards.

use crate::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::test(start_paused = true)]
async fn cancelled_runner_stops_ticking() {
    let mut world = World::new(1);
    world.set_hosts(1, &["1", "2"]);
    let runner = Arc::new(world.runner());
    let token = CancellationToken::new();

    let handle = tokio::spawn({
        let runner = Arc::clone(&runner);
        let token = token.clone();
        async move { runner.run(token).await }
    });

    // First tick fires at once; the next is a full interval away.
    tokio::time::sleep(Duration::from_secs(1)).await;
    token.cancel();
    handle.await.unwrap();

    assert_eq!(world.cmdb.calls(), 1);
    assert_eq!(world.iam_hosts(), vec!["cmdb:biz:1:1", "cmdb:biz:1:2"]);

    tokio::time::sleep(RunnerConfig::default().interval * 2).await;
    assert_eq!(world.cmdb.calls(), 1, "no tick after cancellation");
}

#[tokio::test]
async fn runner_cancelled_before_start_never_ticks() {
    let mut world = World::new(1);
    world.set_hosts(1, &["1"]);
    let token = CancellationToken::new();
    token.cancel();

    world.runner().run(token).await;

    assert_eq!(world.cmdb.calls(), 0);
    assert!(world.iam.calls().is_empty());
}
