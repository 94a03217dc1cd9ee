//! Namespace operations

use tracing::debug;

use vane_common::Result;
use vane_persistence::{
    CreateNamespaceRequest, Namespace, NamespaceStore, UpdateNamespaceRequest,
};

use super::Server;
use crate::model::request::{
    DeleteNamespaceRequest, GetNamespaceRequest, ListRequest, NamespaceList, Validate,
};

impl Server {
    pub async fn get_namespace(&self, request: &GetNamespaceRequest) -> Result<Namespace> {
        debug!(key = %request.key, "get namespace");
        request.validate()?;

        let ns = self.store.get_namespace(&request.key).await?;
        debug!(namespace = ?ns, "get namespace");
        Ok(ns)
    }

    /// List one page of namespaces together with the total count.
    ///
    /// The namespace key of the request is ignored; namespaces are not scoped.
    pub async fn list_namespaces(&self, request: &ListRequest) -> Result<NamespaceList> {
        debug!(request = ?request, "list namespaces");
        request.validate()?;

        let params = request.query_params()?;
        let (page, total_count) = tokio::try_join!(
            self.store.list_namespaces(&params),
            self.store.count_namespaces()
        )?;

        let response = NamespaceList {
            namespaces: page.results,
            next_page_token: page.next_page_token.unwrap_or_default(),
            total_count,
        };
        debug!(
            returned = response.namespaces.len(),
            total_count,
            next_page_token = %response.next_page_token,
            "list namespaces"
        );
        Ok(response)
    }

    pub async fn create_namespace(&self, request: &CreateNamespaceRequest) -> Result<Namespace> {
        debug!(request = ?request, "create namespace");
        request.validate()?;

        let ns = self.store.create_namespace(request).await?;
        debug!(namespace = ?ns, "create namespace");
        Ok(ns)
    }

    pub async fn update_namespace(&self, request: &UpdateNamespaceRequest) -> Result<Namespace> {
        debug!(request = ?request, "update namespace");
        request.validate()?;

        let ns = self.store.update_namespace(request).await?;
        debug!(namespace = ?ns, "update namespace");
        Ok(ns)
    }

    /// Deleting a namespace that does not exist succeeds.
    pub async fn delete_namespace(&self, request: &DeleteNamespaceRequest) -> Result<()> {
        debug!(key = %request.key, "delete namespace");
        request.validate()?;

        self.store.delete_namespace(&request.key).await
    }
}
