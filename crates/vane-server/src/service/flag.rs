//! Flag and segment listings

use tracing::debug;

use vane_common::Result;
use vane_persistence::{FlagStore, SegmentStore};

use super::Server;
use crate::model::request::{FlagList, ListRequest, SegmentList, Validate};

impl Server {
    pub async fn list_flags(&self, request: &ListRequest) -> Result<FlagList> {
        debug!(request = ?request, "list flags");
        request.validate()?;

        let params = request.query_params()?;
        let scope = request.scope();
        let (page, total_count) = tokio::try_join!(
            self.store.list_flags(&params),
            self.store.count_flags(&scope)
        )?;

        debug!(returned = page.results.len(), total_count, "list flags");
        Ok(FlagList {
            flags: page.results,
            next_page_token: page.next_page_token.unwrap_or_default(),
            total_count,
        })
    }

    pub async fn list_segments(&self, request: &ListRequest) -> Result<SegmentList> {
        debug!(request = ?request, "list segments");
        request.validate()?;

        let params = request.query_params()?;
        let scope = request.scope();
        let (page, total_count) = tokio::try_join!(
            self.store.list_segments(&params),
            self.store.count_segments(&scope)
        )?;

        debug!(returned = page.results.len(), total_count, "list segments");
        Ok(SegmentList {
            segments: page.results,
            next_page_token: page.next_page_token.unwrap_or_default(),
            total_count,
        })
    }
}
