//! Application startup: logging and storage initialization.

pub mod logging;

pub use logging::{LoggingConfig, LoggingGuard, init_logging};

use sea_orm::ConnectionTrait;
use tracing::info;
use vane_persistence::{SqlStore, Store, schema};

use crate::model::config::Configuration;

/// Connect to the configured database and return a ready store.
///
/// With `db.bootstrap` enabled the schema and default namespace are created
/// when missing.
pub async fn open_store(configuration: &Configuration) -> anyhow::Result<SqlStore> {
    let db = configuration.database_connection().await?;

    if configuration.db_bootstrap() {
        schema::bootstrap(&db).await?;
        info!("Database schema bootstrapped");
    }

    let store = SqlStore::new(db);
    store.health_check().await?;

    let capabilities = store.capabilities();
    info!(
        backend = ?store.db().get_database_backend(),
        timestamp_precision = ?capabilities.timestamp_precision,
        cascade_deletes = capabilities.cascade_deletes,
        "Storage ready"
    );

    Ok(store)
}
