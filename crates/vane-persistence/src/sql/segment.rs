//! Segment operations

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::debug;

use vane_common::{Result, StorageError};

use super::{DbResultExt, SqlStore, insert_error, namespace_or_default};
use crate::entity::segments;
use crate::model::{CreateSegmentRequest, ResultSet, Segment};
use crate::pagination::{self, NamespaceScope, QueryParams};
use crate::traits::SegmentStore;

fn scoped(scope: &NamespaceScope) -> sea_orm::Select<segments::Entity> {
    let select = segments::Entity::find();
    match scope {
        NamespaceScope::Namespace(key) => {
            select.filter(segments::Column::NamespaceKey.eq(key.as_str()))
        }
        NamespaceScope::All => select,
    }
}

#[async_trait]
impl SegmentStore for SqlStore {
    async fn get_segment(&self, namespace_key: &str, key: &str) -> Result<Segment> {
        let namespace_key = namespace_or_default(namespace_key);

        segments::Entity::find_by_id((namespace_key.to_string(), key.to_string()))
            .one(&self.db)
            .await
            .context("get segment")?
            .map(Segment::from)
            .ok_or_else(|| {
                StorageError::not_found("segment", format!("{}/{}", namespace_key, key))
            })
    }

    async fn list_segments(&self, params: &QueryParams) -> Result<ResultSet<Segment>> {
        let plan = params.build()?;

        let page = pagination::list(&self.db, scoped(&plan.namespace), &plan).await?;

        Ok(page.map(Segment::from))
    }

    async fn count_segments(&self, scope: &NamespaceScope) -> Result<u64> {
        scoped(scope)
            .count(&self.db)
            .await
            .context("count segments")
    }

    async fn create_segment(&self, request: &CreateSegmentRequest) -> Result<Segment> {
        let namespace_key = namespace_or_default(&request.namespace_key);
        self.require_namespace(namespace_key).await?;

        let existing =
            segments::Entity::find_by_id((namespace_key.to_string(), request.key.clone()))
                .one(&self.db)
                .await
                .context("get segment")?;
        if existing.is_some() {
            return Err(StorageError::already_exists("segment", &request.key));
        }

        let now = self.now();
        let entity = segments::ActiveModel {
            namespace_key: Set(namespace_key.to_string()),
            key: Set(request.key.clone()),
            name: Set(request.name.clone()),
            description: Set(request.description.clone()),
            match_type: Set(request.match_type.into()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        segments::Entity::insert(entity)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| insert_error(e, "segment", &request.key, "create segment"))?;

        debug!(namespace = namespace_key, key = %request.key, "Created segment");

        Ok(Segment {
            namespace_key: namespace_key.to_string(),
            key: request.key.clone(),
            name: request.name.clone(),
            description: request.description.clone(),
            match_type: request.match_type,
            created_at: now,
            updated_at: now,
        })
    }
}
