//! Application layer - use cases and services

pub mod pool_aggregator;

pub use pool_aggregator::{fetch_balancer_pools, FetchOptions, PoolAggregator};
