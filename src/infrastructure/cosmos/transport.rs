//! Query transport seam

use async_trait::async_trait;

use crate::shared::errors::TransportError;
use super::proto::{PageRequest, QueryPoolsResponse};

/// Source of `Query/Pools` pages
///
/// One call is one round trip; implementations neither retry nor cache.
#[async_trait]
pub trait PoolPageSource: Send + Sync {
    /// Fetch the page selected by `pagination`
    async fn fetch_pools_page(
        &self,
        pagination: PageRequest,
    ) -> Result<QueryPoolsResponse, TransportError>;

    /// Endpoint URI, for logging
    fn endpoint(&self) -> &str;
}
