//! Shared helpers for storage integration tests
//!
//! Each test gets its own in-memory SQLite database with the bundled schema
//! applied and the default namespace seeded.

#![allow(dead_code)]

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use vane_persistence::{
    BackendCapabilities, CreateFlagRequest, CreateNamespaceRequest, CreateSegmentRequest,
    Namespace, NamespaceStore, SqlStore, schema,
};

/// Connect to a fresh in-memory database.
///
/// The pool is pinned to one connection: every SQLite in-memory connection is
/// its own database.
pub async fn connect() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .expect("in-memory sqlite connection failed");
    schema::bootstrap(&db).await.expect("schema bootstrap failed");
    db
}

pub async fn store() -> SqlStore {
    SqlStore::new(connect().await)
}

/// Store that deletes namespace content explicitly instead of relying on cascades
pub async fn store_without_cascade() -> SqlStore {
    let db = connect().await;
    let capabilities =
        BackendCapabilities::for_backend(db.get_database_backend()).with_cascade_deletes(false);
    SqlStore::with_capabilities(db, capabilities)
}

pub fn unique_key(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

/// Keep creation timestamps strictly increasing between inserts
pub async fn tick() {
    tokio::time::sleep(Duration::from_millis(2)).await;
}

pub async fn create_namespace(store: &SqlStore, key: &str) -> Namespace {
    store
        .create_namespace(&CreateNamespaceRequest {
            key: key.to_string(),
            name: "foo".to_string(),
            description: "bar".to_string(),
        })
        .await
        .expect("create namespace failed")
}

pub fn flag_request(namespace_key: &str, key: &str) -> CreateFlagRequest {
    CreateFlagRequest {
        namespace_key: namespace_key.to_string(),
        key: key.to_string(),
        name: "foo".to_string(),
        description: "bar".to_string(),
        enabled: true,
    }
}

pub fn segment_request(namespace_key: &str, key: &str) -> CreateSegmentRequest {
    CreateSegmentRequest {
        namespace_key: namespace_key.to_string(),
        key: key.to_string(),
        name: "foo".to_string(),
        description: "bar".to_string(),
        ..Default::default()
    }
}
