//! Flag operations

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::debug;

use vane_common::{Result, StorageError};

use super::{DbResultExt, SqlStore, insert_error, namespace_or_default};
use crate::entity::flags;
use crate::model::{CreateFlagRequest, Flag, ResultSet};
use crate::pagination::{self, NamespaceScope, QueryParams};
use crate::traits::FlagStore;

fn scoped(scope: &NamespaceScope) -> sea_orm::Select<flags::Entity> {
    let select = flags::Entity::find();
    match scope {
        NamespaceScope::Namespace(key) => {
            select.filter(flags::Column::NamespaceKey.eq(key.as_str()))
        }
        NamespaceScope::All => select,
    }
}

#[async_trait]
impl FlagStore for SqlStore {
    async fn get_flag(&self, namespace_key: &str, key: &str) -> Result<Flag> {
        let namespace_key = namespace_or_default(namespace_key);

        flags::Entity::find_by_id((namespace_key.to_string(), key.to_string()))
            .one(&self.db)
            .await
            .context("get flag")?
            .map(Flag::from)
            .ok_or_else(|| {
                StorageError::not_found("flag", format!("{}/{}", namespace_key, key))
            })
    }

    async fn list_flags(&self, params: &QueryParams) -> Result<ResultSet<Flag>> {
        let plan = params.build()?;

        let page = pagination::list(&self.db, scoped(&plan.namespace), &plan).await?;

        Ok(page.map(Flag::from))
    }

    async fn count_flags(&self, scope: &NamespaceScope) -> Result<u64> {
        scoped(scope)
            .count(&self.db)
            .await
            .context("count flags")
    }

    async fn create_flag(&self, request: &CreateFlagRequest) -> Result<Flag> {
        let namespace_key = namespace_or_default(&request.namespace_key);
        self.require_namespace(namespace_key).await?;

        let existing =
            flags::Entity::find_by_id((namespace_key.to_string(), request.key.clone()))
                .one(&self.db)
                .await
                .context("get flag")?;
        if existing.is_some() {
            return Err(StorageError::already_exists("flag", &request.key));
        }

        let now = self.now();
        let entity = flags::ActiveModel {
            namespace_key: Set(namespace_key.to_string()),
            key: Set(request.key.clone()),
            name: Set(request.name.clone()),
            description: Set(request.description.clone()),
            enabled: Set(request.enabled),
            created_at: Set(now),
            updated_at: Set(now),
        };

        flags::Entity::insert(entity)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| insert_error(e, "flag", &request.key, "create flag"))?;

        debug!(namespace = namespace_key, key = %request.key, "Created flag");

        Ok(Flag {
            namespace_key: namespace_key.to_string(),
            key: request.key.clone(),
            name: request.name.clone(),
            description: request.description.clone(),
            enabled: request.enabled,
            created_at: now,
            updated_at: now,
        })
    }
}
