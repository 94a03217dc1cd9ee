//! Flag storage trait

use async_trait::async_trait;

use vane_common::Result;

use crate::model::{CreateFlagRequest, Flag, ResultSet};
use crate::pagination::{NamespaceScope, QueryParams};

#[async_trait]
pub trait FlagStore: Send + Sync {
    async fn get_flag(&self, namespace_key: &str, key: &str) -> Result<Flag>;

    /// List flags in the namespace selected by the query options
    async fn list_flags(&self, params: &QueryParams) -> Result<ResultSet<Flag>>;

    async fn count_flags(&self, scope: &NamespaceScope) -> Result<u64>;

    async fn create_flag(&self, request: &CreateFlagRequest) -> Result<Flag>;
}
