//! Flag, segment, constraint, and rule storage tests

mod common;

use vane_common::{DEFAULT_NAMESPACE, ErrorKind};
use vane_persistence::{
    ComparisonType, CreateConstraintRequest, CreateRuleRequest, FlagStore, MatchType,
    NamespaceScope, RuleStore, SegmentStore,
};

use common::{create_namespace, flag_request, segment_request, store, tick, unique_key};

#[tokio::test]
async fn test_create_and_get_flag() {
    let store = store().await;

    let created = store.create_flag(&flag_request("", "checkout")).await.unwrap();
    assert_eq!(created.namespace_key, DEFAULT_NAMESPACE);
    assert!(created.enabled);

    let got = store.get_flag(DEFAULT_NAMESPACE, "checkout").await.unwrap();
    assert_eq!(got, created);
}

#[tokio::test]
async fn test_create_flag_missing_namespace() {
    let store = store().await;

    let err = store
        .create_flag(&flag_request("nope", "checkout"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "namespace \"nope\" not found");
}

#[tokio::test]
async fn test_create_flag_duplicate_key() {
    let store = store().await;
    store.create_flag(&flag_request("", "checkout")).await.unwrap();

    let err = store.create_flag(&flag_request("", "checkout")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(err.to_string(), "flag \"checkout\" is not unique");
}

#[tokio::test]
async fn test_same_flag_key_in_two_namespaces() {
    let store = store().await;
    let ns = unique_key("ns");
    create_namespace(&store, &ns).await;

    store.create_flag(&flag_request("", "checkout")).await.unwrap();
    store.create_flag(&flag_request(&ns, "checkout")).await.unwrap();

    let scoped = store
        .count_flags(&NamespaceScope::Namespace(ns.clone()))
        .await
        .unwrap();
    assert_eq!(scoped, 1);
    assert_eq!(store.count_flags(&NamespaceScope::All).await.unwrap(), 2);
}

#[tokio::test]
async fn test_get_flag_not_found() {
    let store = store().await;

    let err = store.get_flag("", "missing").await.unwrap_err();
    assert_eq!(err.to_string(), "flag \"default/missing\" not found");
}

#[tokio::test]
async fn test_create_and_get_segment() {
    let store = store().await;
    let mut request = segment_request("", "beta-users");
    request.match_type = MatchType::Any;

    let created = store.create_segment(&request).await.unwrap();
    assert_eq!(created.match_type, MatchType::Any);

    let got = store.get_segment(DEFAULT_NAMESPACE, "beta-users").await.unwrap();
    assert_eq!(got, created);
    assert_eq!(
        store.count_segments(&NamespaceScope::default()).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_constraints_require_segment() {
    let store = store().await;

    let err = store
        .create_constraint(&CreateConstraintRequest {
            segment_key: "missing".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_list_constraints_in_creation_order() {
    let store = store().await;
    store.create_segment(&segment_request("", "seg")).await.unwrap();

    let mut ids = Vec::new();
    for property in ["region", "plan"] {
        tick().await;
        let constraint = store
            .create_constraint(&CreateConstraintRequest {
                namespace_key: String::new(),
                segment_key: "seg".to_string(),
                r#type: ComparisonType::String,
                property: property.to_string(),
                operator: "eq".to_string(),
                value: "x".to_string(),
            })
            .await
            .unwrap();
        ids.push(constraint.id);
    }

    let listed = store.list_constraints("", "seg").await.unwrap();
    let listed_ids: Vec<_> = listed.iter().map(|c| c.id.clone()).collect();
    assert_eq!(listed_ids, ids);
    assert_eq!(listed[0].property, "region");
    assert_eq!(listed[0].r#type, ComparisonType::String);
}

#[tokio::test]
async fn test_rules_ordered_by_rank() {
    let store = store().await;
    store.create_flag(&flag_request("", "flag")).await.unwrap();
    store.create_segment(&segment_request("", "seg")).await.unwrap();

    for rank in [2, 1] {
        store
            .create_rule(&CreateRuleRequest {
                namespace_key: String::new(),
                flag_key: "flag".to_string(),
                segment_key: "seg".to_string(),
                rank,
            })
            .await
            .unwrap();
    }

    let ranks: Vec<_> = store
        .list_rules("", "flag")
        .await
        .unwrap()
        .iter()
        .map(|r| r.rank)
        .collect();
    assert_eq!(ranks, vec![1, 2]);
}

#[tokio::test]
async fn test_rule_requires_flag() {
    let store = store().await;
    store.create_segment(&segment_request("", "seg")).await.unwrap();

    let err = store
        .create_rule(&CreateRuleRequest {
            namespace_key: String::new(),
            flag_key: "missing".to_string(),
            segment_key: "seg".to_string(),
            rank: 1,
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "flag \"default/missing\" not found");
}
