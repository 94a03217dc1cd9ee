//! Segment storage trait

use async_trait::async_trait;

use vane_common::Result;

use crate::model::{CreateSegmentRequest, ResultSet, Segment};
use crate::pagination::{NamespaceScope, QueryParams};

#[async_trait]
pub trait SegmentStore: Send + Sync {
    async fn get_segment(&self, namespace_key: &str, key: &str) -> Result<Segment>;

    /// List segments in the namespace selected by the query options
    async fn list_segments(&self, params: &QueryParams) -> Result<ResultSet<Segment>>;

    async fn count_segments(&self, scope: &NamespaceScope) -> Result<u64>;

    async fn create_segment(&self, request: &CreateSegmentRequest) -> Result<Segment>;
}
