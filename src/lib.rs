//! Osmopools - Osmosis GAMM pool catalog reader
//!
//! Pages through `osmosis.gamm.v1beta1.Query/Pools`, decodes each `Any`
//! envelope through an interface registry and returns the balancer pools
//! admitted by an allow-list, keyed by pool id.

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod report;
pub mod shared;

// Re-export main types for convenience
pub use application::{fetch_balancer_pools, FetchOptions, PoolAggregator};
pub use domain::pool::{AllowListFilter, PoolId, PoolSet};
pub use infrastructure::cosmos::{ConnectionContext, ContextBuilder, PoolPageSource};
