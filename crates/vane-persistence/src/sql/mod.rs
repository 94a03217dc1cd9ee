//! SQL-based storage backend (MySQL/PostgreSQL/SQLite via SeaORM)
//!
//! `SqlStore` wraps a SeaORM `DatabaseConnection` and implements every storage
//! trait. Dialect differences are reduced to [`BackendCapabilities`].

mod flag;
mod namespace;
mod reset;
mod rule;
mod segment;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, SqlErr};

use vane_common::{DEFAULT_NAMESPACE, Result, StorageError};

use crate::entity::{flags, namespaces, segments};
use crate::traits::Store;

pub use reset::default_namespace;
pub(crate) use reset::delete_namespaces;

/// Precision the backend keeps for timestamp columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampPrecision {
    Seconds,
    Microseconds,
}

impl TimestampPrecision {
    pub fn truncate(self, ts: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            TimestampPrecision::Seconds => ts.trunc_subsecs(0),
            TimestampPrecision::Microseconds => ts.trunc_subsecs(6),
        }
    }
}

/// Dialect capabilities of the backing database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendCapabilities {
    pub timestamp_precision: TimestampPrecision,
    /// Whether child rows are removed by `ON DELETE CASCADE`. When false, the
    /// store deletes children explicitly before their namespace.
    pub cascade_deletes: bool,
}

impl BackendCapabilities {
    pub fn for_backend(backend: DbBackend) -> Self {
        match backend {
            DbBackend::MySql => Self {
                timestamp_precision: TimestampPrecision::Seconds,
                cascade_deletes: true,
            },
            _ => Self {
                timestamp_precision: TimestampPrecision::Microseconds,
                cascade_deletes: true,
            },
        }
    }

    pub fn with_cascade_deletes(mut self, cascade_deletes: bool) -> Self {
        self.cascade_deletes = cascade_deletes;
        self
    }
}

/// Annotate backend errors with the operation that produced them
pub(crate) trait DbResultExt<T> {
    fn context(self, context: &str) -> Result<T>;
}

impl<T> DbResultExt<T> for std::result::Result<T, DbErr> {
    fn context(self, context: &str) -> Result<T> {
        self.map_err(|e| StorageError::internal(context, e))
    }
}

/// Classify an insert failure; unique violations become `AlreadyExists`
pub(crate) fn insert_error(
    err: DbErr,
    kind: &'static str,
    key: &str,
    context: &str,
) -> StorageError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StorageError::already_exists(kind, key),
        _ => StorageError::internal(context, err),
    }
}

/// An empty namespace key addresses the default namespace
pub(crate) fn namespace_or_default(key: &str) -> &str {
    if key.is_empty() { DEFAULT_NAMESPACE } else { key }
}

/// SQL storage backend
///
/// Cloning is cheap; the underlying connection is a pool.
#[derive(Clone, Debug)]
pub struct SqlStore {
    db: DatabaseConnection,
    capabilities: BackendCapabilities,
}

impl SqlStore {
    /// Create a store whose capabilities are derived from the connection's backend
    pub fn new(db: DatabaseConnection) -> Self {
        let capabilities = BackendCapabilities::for_backend(db.get_database_backend());
        Self { db, capabilities }
    }

    pub fn with_capabilities(db: DatabaseConnection, capabilities: BackendCapabilities) -> Self {
        Self { db, capabilities }
    }

    /// Get a reference to the underlying database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Current time at the precision the backend stores
    fn now(&self) -> DateTime<Utc> {
        self.capabilities.timestamp_precision.truncate(Utc::now())
    }

    async fn require_namespace(&self, key: &str) -> Result<()> {
        namespaces::Entity::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .context("get namespace")?
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found("namespace", key))
    }

    async fn require_flag(&self, namespace_key: &str, key: &str) -> Result<()> {
        flags::Entity::find_by_id((namespace_key.to_string(), key.to_string()))
            .one(&self.db)
            .await
            .context("get flag")?
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found("flag", format!("{}/{}", namespace_key, key)))
    }

    async fn require_segment(&self, namespace_key: &str, key: &str) -> Result<()> {
        segments::Entity::find_by_id((namespace_key.to_string(), key.to_string()))
            .one(&self.db)
            .await
            .context("get segment")?
            .map(|_| ())
            .ok_or_else(|| {
                StorageError::not_found("segment", format!("{}/{}", namespace_key, key))
            })
    }
}

#[async_trait]
impl Store for SqlStore {
    fn capabilities(&self) -> BackendCapabilities {
        self.capabilities
    }

    async fn health_check(&self) -> Result<()> {
        self.db.ping().await.context("ping database")
    }

    async fn reset_all(&self) -> Result<()> {
        reset::reset_all(&self.db, self.capabilities, self.now()).await
    }

    async fn purge_namespaces(&self) -> Result<()> {
        reset::purge_namespaces(&self.db, self.capabilities).await
    }
}
