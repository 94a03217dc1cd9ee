//! Constraint and rule operations

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;
use uuid::Uuid;

use vane_common::Result;

use super::{DbResultExt, SqlStore, namespace_or_default};
use crate::entity::{constraints, rules};
use crate::model::{Constraint, CreateConstraintRequest, CreateRuleRequest, Rule};
use crate::traits::RuleStore;

#[async_trait]
impl RuleStore for SqlStore {
    async fn create_constraint(&self, request: &CreateConstraintRequest) -> Result<Constraint> {
        let namespace_key = namespace_or_default(&request.namespace_key);
        self.require_segment(namespace_key, &request.segment_key)
            .await?;

        let now = self.now();
        let constraint = Constraint {
            id: Uuid::new_v4().to_string(),
            namespace_key: namespace_key.to_string(),
            segment_key: request.segment_key.clone(),
            r#type: request.r#type,
            property: request.property.clone(),
            operator: request.operator.clone(),
            value: request.value.clone(),
            created_at: now,
            updated_at: now,
        };

        let entity = constraints::ActiveModel {
            id: Set(constraint.id.clone()),
            namespace_key: Set(constraint.namespace_key.clone()),
            segment_key: Set(constraint.segment_key.clone()),
            r#type: Set(constraint.r#type.into()),
            property: Set(constraint.property.clone()),
            operator: Set(constraint.operator.clone()),
            value: Set(constraint.value.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        constraints::Entity::insert(entity)
            .exec_without_returning(&self.db)
            .await
            .context("create constraint")?;

        debug!(
            namespace = namespace_key,
            segment = %request.segment_key,
            id = %constraint.id,
            "Created constraint"
        );

        Ok(constraint)
    }

    async fn list_constraints(
        &self,
        namespace_key: &str,
        segment_key: &str,
    ) -> Result<Vec<Constraint>> {
        let namespace_key = namespace_or_default(namespace_key);

        let rows = constraints::Entity::find()
            .filter(constraints::Column::NamespaceKey.eq(namespace_key))
            .filter(constraints::Column::SegmentKey.eq(segment_key))
            .order_by_asc(constraints::Column::CreatedAt)
            .order_by_asc(constraints::Column::Id)
            .all(&self.db)
            .await
            .context("list constraints")?;

        Ok(rows.into_iter().map(Constraint::from).collect())
    }

    async fn create_rule(&self, request: &CreateRuleRequest) -> Result<Rule> {
        let namespace_key = namespace_or_default(&request.namespace_key);
        self.require_flag(namespace_key, &request.flag_key).await?;
        self.require_segment(namespace_key, &request.segment_key)
            .await?;

        let now = self.now();
        let rule = Rule {
            id: Uuid::new_v4().to_string(),
            namespace_key: namespace_key.to_string(),
            flag_key: request.flag_key.clone(),
            segment_key: request.segment_key.clone(),
            rank: request.rank,
            created_at: now,
            updated_at: now,
        };

        let entity = rules::ActiveModel {
            id: Set(rule.id.clone()),
            namespace_key: Set(rule.namespace_key.clone()),
            flag_key: Set(rule.flag_key.clone()),
            segment_key: Set(rule.segment_key.clone()),
            rank: Set(rule.rank),
            created_at: Set(now),
            updated_at: Set(now),
        };

        rules::Entity::insert(entity)
            .exec_without_returning(&self.db)
            .await
            .context("create rule")?;

        debug!(
            namespace = namespace_key,
            flag = %request.flag_key,
            segment = %request.segment_key,
            rank = request.rank,
            "Created rule"
        );

        Ok(rule)
    }

    async fn list_rules(&self, namespace_key: &str, flag_key: &str) -> Result<Vec<Rule>> {
        let namespace_key = namespace_or_default(namespace_key);

        let rows = rules::Entity::find()
            .filter(rules::Column::NamespaceKey.eq(namespace_key))
            .filter(rules::Column::FlagKey.eq(flag_key))
            .order_by_asc(rules::Column::Rank)
            .order_by_asc(rules::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list rules")?;

        Ok(rows.into_iter().map(Rule::from).collect())
    }
}
