//! Namespace storage trait

use async_trait::async_trait;

use vane_common::Result;

use crate::model::{CreateNamespaceRequest, Namespace, ResultSet, UpdateNamespaceRequest};
use crate::pagination::QueryParams;

#[async_trait]
pub trait NamespaceStore: Send + Sync {
    async fn get_namespace(&self, key: &str) -> Result<Namespace>;

    /// List namespaces; the namespace filter of `params` is ignored
    async fn list_namespaces(&self, params: &QueryParams) -> Result<ResultSet<Namespace>>;

    async fn count_namespaces(&self) -> Result<u64>;

    async fn create_namespace(&self, request: &CreateNamespaceRequest) -> Result<Namespace>;

    async fn update_namespace(&self, request: &UpdateNamespaceRequest) -> Result<Namespace>;

    /// Delete a namespace and its content. Missing namespaces are not an
    /// error; protected namespaces are refused.
    async fn delete_namespace(&self, key: &str) -> Result<()>;
}
