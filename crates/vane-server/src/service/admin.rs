//! Administrative operations

use tracing::debug;

use vane_common::Result;
use vane_persistence::Store;

use super::Server;

impl Server {
    /// Remove all namespaces, flags, segments, constraints, and rules, leaving
    /// only the protected default namespace.
    pub async fn delete_all_contents(&self) -> Result<()> {
        debug!("delete all contents");

        self.store.reset_all().await
    }

    pub async fn health_check(&self) -> Result<()> {
        self.store.health_check().await
    }
}
