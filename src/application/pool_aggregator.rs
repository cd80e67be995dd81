//! Paginated GAMM pool aggregation
//!
//! Walks `Query/Pools` page by page until the node stops returning a
//! continuation key, keeping the balancer pools admitted by the allow-list.
//! Pages are fetched strictly in sequence; any failure aborts the whole
//! fetch and discards what was accumulated so far.

use tracing::{debug, info};

use crate::domain::pool::{AllowListFilter, DecodedEnvelope, PoolSet, PoolVariant};
use crate::infrastructure::cosmos::proto::{PageRequest, QueryPoolsResponse};
use crate::infrastructure::cosmos::ConnectionContext;
use crate::shared::errors::QueryError;

/// Paging knobs for a single fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Entries per page; `None` leaves the node default
    pub page_size: Option<u64>,
    /// Abort once this many pages were fetched and the catalog continues
    pub max_pages: Option<usize>,
}

/// Aggregates the balancer pool catalog of a chain
#[derive(Debug, Clone, Default)]
pub struct PoolAggregator {
    options: FetchOptions,
}

impl PoolAggregator {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }

    /// Fetch every balancer pool admitted by `filter`
    pub async fn fetch(
        &self,
        ctx: &ConnectionContext,
        filter: &AllowListFilter,
    ) -> Result<PoolSet, QueryError> {
        let mut pools = PoolSet::new();
        let mut key: Vec<u8> = Vec::new();
        let mut page = 0usize;

        loop {
            if let Some(max_pages) = self.options.max_pages {
                if page >= max_pages {
                    return Err(QueryError::PageLimitExceeded { max_pages });
                }
            }
            page += 1;

            let request = PageRequest {
                key: std::mem::take(&mut key),
                limit: self.options.page_size.unwrap_or(0),
                ..Default::default()
            };
            let response = ctx
                .transport()
                .fetch_pools_page(request)
                .await
                .map_err(|source| QueryError::PageFetch { page, source })?;

            self.absorb_page(ctx, filter, page, &response, &mut pools)?;

            match response.next_key() {
                Some(next) => key = next.to_vec(),
                None => break,
            }
        }

        info!(
            chain_id = ctx.chain_id(),
            pages = page,
            pools = pools.len(),
            filtered = filter.is_enabled(),
            "✅ Pool catalog fetched"
        );
        Ok(pools)
    }

    fn absorb_page(
        &self,
        ctx: &ConnectionContext,
        filter: &AllowListFilter,
        page: usize,
        response: &QueryPoolsResponse,
        pools: &mut PoolSet,
    ) -> Result<(), QueryError> {
        let registry = &ctx.encoding().interface_registry;
        let mut skipped = 0usize;

        for envelope in &response.pools {
            let decoded = registry
                .unpack(envelope)
                .map_err(|source| QueryError::MalformedEnvelope {
                    page,
                    type_url: envelope.type_url.clone(),
                    source,
                })?;

            match decoded {
                DecodedEnvelope::Recognized(PoolVariant::Balancer(pool)) => {
                    if filter.admits(pool.id) {
                        pools.insert(pool.id, pool);
                    }
                }
                DecodedEnvelope::Recognized(other) => {
                    debug!(page, pool_id = other.id(), kind = other.kind().as_str(), "skipping non-balancer pool");
                    skipped += 1;
                }
                DecodedEnvelope::Unrecognized(type_url) => {
                    debug!(page, %type_url, "skipping unrecognized pool type");
                    skipped += 1;
                }
            }
        }

        debug!(
            page,
            entries = response.pools.len(),
            skipped,
            accumulated = pools.len(),
            "page processed"
        );
        Ok(())
    }
}

/// Fetch all balancer pools admitted by `filter`, paging per `options`
pub async fn fetch_balancer_pools(
    ctx: &ConnectionContext,
    filter: &AllowListFilter,
    options: &FetchOptions,
) -> Result<PoolSet, QueryError> {
    PoolAggregator::new(options.clone()).fetch(ctx, filter).await
}
