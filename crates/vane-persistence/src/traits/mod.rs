//! Storage traits
//!
//! These traits define the storage interface consumed by the server layer.
//! `SqlStore` implements all of them over a SeaORM connection.

pub mod flag;
pub mod namespace;
pub mod rule;
pub mod segment;

pub use flag::FlagStore;
pub use namespace::NamespaceStore;
pub use rule::RuleStore;
pub use segment::SegmentStore;

use async_trait::async_trait;

use vane_common::Result;

use crate::sql::BackendCapabilities;

/// Unified storage trait
#[async_trait]
pub trait Store: NamespaceStore + FlagStore + SegmentStore + RuleStore + Send + Sync {
    /// Dialect capabilities of the backing database
    fn capabilities(&self) -> BackendCapabilities;

    /// Health check for the storage backend
    async fn health_check(&self) -> Result<()>;

    /// Delete every namespace and everything they own, then recreate the
    /// protected default namespace. Runs as one transaction.
    async fn reset_all(&self) -> Result<()>;

    /// Delete every namespace and everything they own without recreating the
    /// default namespace. The caller is responsible for recreating it.
    async fn purge_namespaces(&self) -> Result<()>;
}
