// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use authsync_core::test_support::{backend, desired_host};

#[tokio::test]
async fn dry_run_projects_attribute_path_with_leaf_prefix() {
    let iam = FakeIamAdapter::new().with_leaf_prefix("cmdb:biz:1:");
    let result = iam.dry_run(&[desired_host(1, "1000")]).await.unwrap().unwrap();
    let canonical = result.single().unwrap();
    assert_eq!(Key::from_canonical(canonical), "biz:1-host:cmdb:biz:1:1000");
    assert_eq!(canonical.scope, Scope::business(1));
}

#[tokio::test]
async fn ambiguous_and_duplicated_instances() {
    let iam = FakeIamAdapter::new();
    iam.set_ambiguous("1");
    iam.set_duplicated("2");
    let none = iam.dry_run(&[desired_host(1, "1")]).await.unwrap().unwrap();
    let two = iam.dry_run(&[desired_host(1, "2")]).await.unwrap().unwrap();
    assert!(none.is_empty());
    assert_eq!(two.len(), 2);
}

#[tokio::test]
async fn scripted_dry_run_answers_are_consumed_in_order() {
    let iam = FakeIamAdapter::new();
    iam.script_dry_run(DryRunScript::Nil);
    iam.script_dry_run(DryRunScript::Fail(IamError::Transport("down".into())));
    let d = [desired_host(1, "1")];
    assert_eq!(iam.dry_run(&d).await, Ok(None));
    assert_eq!(iam.dry_run(&d).await, Err(IamError::Transport("down".into())));
    assert!(iam.dry_run(&d).await.unwrap().is_some());
}

#[tokio::test]
async fn register_is_truthful_and_idempotent() {
    let iam = FakeIamAdapter::new();
    let d = [desired_host(1, "1000")];
    iam.register(&d).await.unwrap();
    iam.register(&d).await.unwrap();
    assert_eq!(iam.keys(), vec![Key::from_backend(&backend(&[("biz", "1"), ("host", "1000")]))]);
    assert_eq!(iam.registers().len(), 2);
}

#[tokio::test]
async fn deregister_removes_only_matching_scope() {
    let iam = FakeIamAdapter::new();
    let b = backend(&[("biz", "1"), ("host", "1")]);
    iam.seed(Scope::business(1), b.clone());
    iam.seed(Scope::business(2), b.clone());
    iam.deregister(&Scope::business(1), &[b]).await.unwrap();
    let listed = iam
        .list_by_attribute(&desired_host(2, "x"))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(iam.keys().len(), 1);
}

#[tokio::test]
async fn list_by_condition_filters_on_parents_and_records_request_id() {
    let iam = FakeIamAdapter::new();
    iam.seed(Scope::business(1), backend(&[("biz", "1"), ("host", "1")]));
    iam.seed(Scope::business(1), backend(&[("biz", "9"), ("host", "2")]));
    let cond = SearchCondition::new(Scope::business(1), "host")
        .with_parent(ResourceIdSegment::new("biz", "1"));
    let header = RequestHeader::new().with_request_id("rid-1");
    let listed = iam.list_by_condition(&header, &cond).await.unwrap();
    assert_eq!(listed, vec![backend(&[("biz", "1"), ("host", "1")])]);
    assert!(matches!(
        &iam.calls()[0],
        IamCall::ListByCondition { request_id: Some(rid), .. } if rid == "rid-1"
    ));
}

#[yare::parameterized(
    register   = { 0 },
    deregister = { 1 },
    list       = { 2 },
)]
fn injected_failures_surface(which: u8) {
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    rt.block_on(async {
        let iam = FakeIamAdapter::new();
        let err = IamError::Remote { code: 500, message: "boom".into() };
        let result = match which {
            0 => {
                iam.fail_register(err.clone());
                iam.register(&[desired_host(1, "1")]).await
            }
            1 => {
                iam.fail_deregister(err.clone());
                iam.deregister(&Scope::business(1), &[]).await
            }
            _ => {
                iam.fail_list(err.clone());
                iam.list_by_attribute(&desired_host(1, "1")).await.map(|_| ())
            }
        };
        assert_eq!(result, Err(err));
        assert_eq!(iam.calls().len(), 1);
    });
}

#[tokio::test]
async fn related_types_are_reported() {
    let iam = FakeIamAdapter::new();
    iam.set_related_to_resource_id("sys_model");
    assert!(iam.is_related_to_resource_id(&"sys_model".into()));
    assert!(!iam.is_related_to_resource_id(&"host".into()));
}
