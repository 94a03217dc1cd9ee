//! Namespace operations

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, EntityTrait, PaginatorTrait, TransactionTrait,
};
use tracing::debug;

use vane_common::{Result, StorageError};

use super::{DbResultExt, SqlStore, delete_namespaces, insert_error};
use crate::entity::namespaces;
use crate::model::{CreateNamespaceRequest, Namespace, ResultSet, UpdateNamespaceRequest};
use crate::pagination::{self, QueryParams};
use crate::traits::NamespaceStore;

#[async_trait]
impl NamespaceStore for SqlStore {
    async fn get_namespace(&self, key: &str) -> Result<Namespace> {
        namespaces::Entity::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .context("get namespace")?
            .map(Namespace::from)
            .ok_or_else(|| StorageError::not_found("namespace", key))
    }

    async fn list_namespaces(&self, params: &QueryParams) -> Result<ResultSet<Namespace>> {
        let plan = params.build()?;

        let page = pagination::list(&self.db, namespaces::Entity::find(), &plan).await?;

        Ok(page.map(Namespace::from))
    }

    async fn count_namespaces(&self) -> Result<u64> {
        namespaces::Entity::find()
            .count(&self.db)
            .await
            .context("count namespaces")
    }

    async fn create_namespace(&self, request: &CreateNamespaceRequest) -> Result<Namespace> {
        let existing = namespaces::Entity::find_by_id(request.key.clone())
            .one(&self.db)
            .await
            .context("get namespace")?;
        if existing.is_some() {
            return Err(StorageError::already_exists("namespace", &request.key));
        }

        let now = self.now();
        let entity = namespaces::ActiveModel {
            key: Set(request.key.clone()),
            name: Set(request.name.clone()),
            description: Set(request.description.clone()),
            protected: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        namespaces::Entity::insert(entity)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| insert_error(e, "namespace", &request.key, "create namespace"))?;

        debug!(key = %request.key, "Created namespace");

        Ok(Namespace {
            key: request.key.clone(),
            name: request.name.clone(),
            description: request.description.clone(),
            protected: false,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_namespace(&self, request: &UpdateNamespaceRequest) -> Result<Namespace> {
        let Some(entity) = namespaces::Entity::find_by_id(request.key.clone())
            .one(&self.db)
            .await
            .context("get namespace")?
        else {
            return Err(StorageError::not_found("namespace", &request.key));
        };

        let mut namespace: namespaces::ActiveModel = entity.into();
        namespace.name = Set(request.name.clone());
        namespace.description = Set(request.description.clone());
        namespace.updated_at = Set(self.now());

        let updated = namespace
            .update(&self.db)
            .await
            .context("update namespace")?;

        debug!(key = %request.key, "Updated namespace");

        Ok(updated.into())
    }

    async fn delete_namespace(&self, key: &str) -> Result<()> {
        let Some(entity) = namespaces::Entity::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .context("get namespace")?
        else {
            return Ok(());
        };

        if entity.protected {
            return Err(StorageError::InvalidArgument(format!(
                "namespace {:?} is protected",
                key
            )));
        }

        if self.capabilities.cascade_deletes {
            delete_namespaces(&self.db, self.capabilities, Some(key)).await?;
        } else {
            let txn = self
                .db
                .begin()
                .await
                .context("begin delete namespace transaction")?;
            delete_namespaces(&txn, self.capabilities, Some(key)).await?;
            txn.commit()
                .await
                .context("commit delete namespace transaction")?;
        }

        debug!(key, "Deleted namespace");
        Ok(())
    }
}
