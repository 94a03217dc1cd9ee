//! Content reset engine
//!
//! Removing a namespace removes everything it owns. Whole-store wipes run in a
//! single transaction: the transaction is rolled back when dropped uncommitted,
//! so an early error or a cancelled caller leaves the store untouched.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
};
use tracing::{debug, info};

use vane_common::{
    DEFAULT_NAMESPACE, DEFAULT_NAMESPACE_DESCRIPTION, DEFAULT_NAMESPACE_NAME, Result,
};

use super::{BackendCapabilities, DbResultExt};
use crate::entity::{constraints, flags, namespaces, rules, segments};

/// Row for the protected default namespace
pub fn default_namespace(now: DateTime<Utc>) -> namespaces::ActiveModel {
    namespaces::ActiveModel {
        key: Set(DEFAULT_NAMESPACE.to_string()),
        name: Set(DEFAULT_NAMESPACE_NAME.to_string()),
        description: Set(DEFAULT_NAMESPACE_DESCRIPTION.to_string()),
        protected: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Delete children of `$entity` for one namespace, or for all of them.
macro_rules! delete_scoped {
    ($conn:expr, $entity:ident, $namespace_key:expr) => {{
        let mut delete = $entity::Entity::delete_many();
        if let Some(key) = $namespace_key {
            delete = delete.filter($entity::Column::NamespaceKey.eq(key));
        }
        delete
            .exec($conn)
            .await
            .context(concat!("delete ", stringify!($entity)))?
            .rows_affected
    }};
}

/// Delete one namespace (or every namespace when `namespace_key` is `None`)
/// together with its flags, segments, constraints, and rules.
///
/// Without declarative cascades the children go first, in dependency order.
/// Returns the number of namespaces removed.
pub(crate) async fn delete_namespaces<C>(
    conn: &C,
    capabilities: BackendCapabilities,
    namespace_key: Option<&str>,
) -> Result<u64>
where
    C: ConnectionTrait,
{
    if !capabilities.cascade_deletes {
        let deleted_rules = delete_scoped!(conn, rules, namespace_key);
        let deleted_constraints = delete_scoped!(conn, constraints, namespace_key);
        let deleted_flags = delete_scoped!(conn, flags, namespace_key);
        let deleted_segments = delete_scoped!(conn, segments, namespace_key);
        debug!(
            rules = deleted_rules,
            constraints = deleted_constraints,
            flags = deleted_flags,
            segments = deleted_segments,
            "Deleted namespace content explicitly"
        );
    }

    let mut delete = namespaces::Entity::delete_many();
    if let Some(key) = namespace_key {
        delete = delete.filter(namespaces::Column::Key.eq(key));
    }
    let removed = delete
        .exec(conn)
        .await
        .context("delete namespaces")?
        .rows_affected;

    Ok(removed)
}

/// Wipe every namespace and recreate the protected default namespace.
pub(crate) async fn reset_all(
    db: &DatabaseConnection,
    capabilities: BackendCapabilities,
    now: DateTime<Utc>,
) -> Result<()> {
    let txn = db.begin().await.context("begin reset transaction")?;

    let removed = delete_namespaces(&txn, capabilities, None).await?;

    namespaces::Entity::insert(default_namespace(now))
        .exec_without_returning(&txn)
        .await
        .context("insert default namespace")?;

    txn.commit().await.context("commit reset transaction")?;

    info!(
        removed_namespaces = removed,
        "Reset all content to the default namespace"
    );
    Ok(())
}

/// Wipe every namespace without recreating the default one.
pub(crate) async fn purge_namespaces(
    db: &DatabaseConnection,
    capabilities: BackendCapabilities,
) -> Result<()> {
    let txn = db.begin().await.context("begin purge transaction")?;

    let removed = delete_namespaces(&txn, capabilities, None).await?;

    txn.commit().await.context("commit purge transaction")?;

    info!(removed_namespaces = removed, "Purged all namespaces");
    Ok(())
}
