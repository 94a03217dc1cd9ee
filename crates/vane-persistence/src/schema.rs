//! Schema bootstrap
//!
//! Applies the bundled DDL for the connected backend and seeds the protected
//! default namespace. Every statement is idempotent, so bootstrapping an
//! existing database is a no-op. This is not a migration system.

use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait};
use tracing::{debug, info};

use vane_common::{DEFAULT_NAMESPACE, Result};

use crate::entity::namespaces;
use crate::sql::{BackendCapabilities, DbResultExt, default_namespace};

const SQLITE_SCHEMA: &str = include_str!("../../../conf/sqlite-schema.sql");
const POSTGRESQL_SCHEMA: &str = include_str!("../../../conf/postgresql-schema.sql");
const MYSQL_SCHEMA: &str = include_str!("../../../conf/mysql-schema.sql");

/// Bundled DDL for a backend
pub fn schema_for(backend: DbBackend) -> &'static str {
    match backend {
        DbBackend::MySql => MYSQL_SCHEMA,
        DbBackend::Postgres => POSTGRESQL_SCHEMA,
        _ => SQLITE_SCHEMA,
    }
}

/// Split a DDL script into statements.
///
/// Comment lines go first so a `;` inside a comment never ends a statement.
fn statements(script: &str) -> Vec<String> {
    script
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
        .split(';')
        .map(|statement| statement.trim().to_string())
        .filter(|statement| !statement.is_empty())
        .collect()
}

/// Create the tables if needed and make sure the default namespace exists.
pub async fn bootstrap(db: &DatabaseConnection) -> Result<()> {
    let backend = db.get_database_backend();

    for statement in statements(schema_for(backend)) {
        debug!(statement = %statement, "Applying schema statement");
        db.execute_unprepared(&statement)
            .await
            .context("apply schema")?;
    }

    let created = ensure_default_namespace(db).await?;
    info!(
        backend = ?backend,
        seeded_default_namespace = created,
        "Schema bootstrap complete"
    );
    Ok(())
}

/// Insert the protected default namespace when it is missing.
///
/// Returns whether a row was inserted.
pub async fn ensure_default_namespace(db: &DatabaseConnection) -> Result<bool> {
    let existing = namespaces::Entity::find_by_id(DEFAULT_NAMESPACE.to_string())
        .one(db)
        .await
        .context("get namespace")?;
    if existing.is_some() {
        return Ok(false);
    }

    let now = BackendCapabilities::for_backend(db.get_database_backend())
        .timestamp_precision
        .truncate(Utc::now());

    namespaces::Entity::insert(default_namespace(now))
        .exec_without_returning(db)
        .await
        .context("insert default namespace")?;

    Ok(true)
}
