//! Server operation tests against an in-memory database

mod common;

use vane_common::{DEFAULT_NAMESPACE, ErrorKind};
use vane_persistence::{
    CreateFlagRequest, CreateNamespaceRequest, CreateSegmentRequest, FlagStore, SegmentStore,
    UpdateNamespaceRequest,
};
use vane_server::model::request::{DeleteNamespaceRequest, GetNamespaceRequest, ListRequest};

use common::server;

fn create_request(key: &str) -> CreateNamespaceRequest {
    CreateNamespaceRequest {
        key: key.to_string(),
        name: key.to_uppercase(),
        description: String::new(),
    }
}

#[tokio::test]
async fn test_namespace_lifecycle() {
    let server = server().await;

    let created = server.create_namespace(&create_request("team-a")).await.unwrap();
    assert_eq!(created.name, "TEAM-A");

    let updated = server
        .update_namespace(&UpdateNamespaceRequest {
            key: "team-a".to_string(),
            name: "Team A".to_string(),
            description: "owned by team a".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(updated.description, "owned by team a");

    let got = server
        .get_namespace(&GetNamespaceRequest {
            key: "team-a".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(got.name, "Team A");

    server
        .delete_namespace(&DeleteNamespaceRequest {
            key: "team-a".to_string(),
        })
        .await
        .unwrap();
    let err = server
        .get_namespace(&GetNamespaceRequest {
            key: "team-a".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_invalid_key_rejected_before_store() {
    let server = server().await;

    let err = server
        .create_namespace(&create_request("not valid!"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let total = server
        .list_namespaces(&ListRequest::default())
        .await
        .unwrap()
        .total_count;
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_list_namespaces_with_total_count() {
    let server = server().await;
    for key in ["a", "b", "c"] {
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        server.create_namespace(&create_request(key)).await.unwrap();
    }

    let mut request = ListRequest {
        limit: 3,
        ..Default::default()
    };
    let first = server.list_namespaces(&request).await.unwrap();
    assert_eq!(first.total_count, 4);
    assert_eq!(first.namespaces.len(), 3);
    assert_eq!(first.namespaces[0].key, DEFAULT_NAMESPACE);
    assert!(!first.next_page_token.is_empty());

    request.page_token = first.next_page_token;
    let second = server.list_namespaces(&request).await.unwrap();
    assert_eq!(second.total_count, 4);
    assert_eq!(second.namespaces.len(), 1);
    assert_eq!(second.namespaces[0].key, "c");
    assert!(second.next_page_token.is_empty());
}

#[tokio::test]
async fn test_list_namespaces_bad_token() {
    let server = server().await;

    let err = server
        .list_namespaces(&ListRequest {
            page_token: "Hello World".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "pageToken is not valid: \"Hello World\"");
}

#[tokio::test]
async fn test_list_flags_and_segments() {
    let server = server().await;
    server.create_namespace(&create_request("other")).await.unwrap();

    for namespace_key in ["", "other"] {
        server
            .store()
            .create_flag(&CreateFlagRequest {
                namespace_key: namespace_key.to_string(),
                key: "checkout".to_string(),
                name: "Checkout".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
    }
    server
        .store()
        .create_segment(&CreateSegmentRequest {
            namespace_key: "other".to_string(),
            key: "beta".to_string(),
            name: "Beta".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let flags = server.list_flags(&ListRequest::default()).await.unwrap();
    assert_eq!(flags.total_count, 1);
    assert_eq!(flags.flags[0].namespace_key, DEFAULT_NAMESPACE);

    let all_flags = server
        .list_flags(&ListRequest {
            namespace_key: "*".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all_flags.total_count, 2);
    assert_eq!(all_flags.flags.len(), 2);

    let segments = server
        .list_segments(&ListRequest {
            namespace_key: "other".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(segments.total_count, 1);
    assert_eq!(segments.segments[0].key, "beta");
}

#[tokio::test]
async fn test_delete_all_contents() {
    let server = server().await;
    server.create_namespace(&create_request("team-a")).await.unwrap();
    server
        .store()
        .create_flag(&CreateFlagRequest {
            namespace_key: "team-a".to_string(),
            key: "checkout".to_string(),
            name: "Checkout".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    server.delete_all_contents().await.unwrap();

    let namespaces = server.list_namespaces(&ListRequest::default()).await.unwrap();
    assert_eq!(namespaces.total_count, 1);
    assert_eq!(namespaces.namespaces[0].key, DEFAULT_NAMESPACE);
    assert!(namespaces.namespaces[0].protected);

    let flags = server
        .list_flags(&ListRequest {
            namespace_key: "*".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(flags.total_count, 0);
}

#[tokio::test]
async fn test_delete_default_namespace_refused() {
    let server = server().await;

    let err = server
        .delete_namespace(&DeleteNamespaceRequest {
            key: DEFAULT_NAMESPACE.to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}
