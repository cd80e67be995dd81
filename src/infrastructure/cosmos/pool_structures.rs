//! On-chain GAMM pool models
//!
//! Decimal fields (`swap_fee`, `exit_fee`, weights) carry the chain's
//! 18-decimal fixed-point integer string, see [`crate::shared::utils::format_dec`].

use serde::Serialize;

use super::proto::{Coin, Duration, Timestamp};

pub const BALANCER_POOL_TYPE_URL: &str = "/osmosis.gamm.v1beta1.Pool";
pub const STABLESWAP_POOL_TYPE_URL: &str = "/osmosis.gamm.poolmodels.stableswap.v1beta1.Pool";

/// `osmosis.gamm.v1beta1.Pool` (balancer / weighted pool)
#[derive(Clone, PartialEq, Serialize, ::prost::Message)]
pub struct BalancerPool {
    #[prost(string, tag = "1")]
    pub address: String,
    #[prost(uint64, tag = "2")]
    pub id: u64,
    #[prost(message, optional, tag = "3")]
    pub pool_params: Option<BalancerPoolParams>,
    #[prost(string, tag = "4")]
    pub future_pool_governor: String,
    #[prost(message, optional, tag = "5")]
    pub total_shares: Option<Coin>,
    #[prost(message, repeated, tag = "6")]
    pub pool_assets: Vec<PoolAsset>,
    #[prost(string, tag = "7")]
    pub total_weight: String,
}

impl BalancerPool {
    pub fn swap_fee(&self) -> Option<&str> {
        self.pool_params.as_ref().map(|p| p.swap_fee.as_str())
    }
}

#[derive(Clone, PartialEq, Serialize, ::prost::Message)]
pub struct BalancerPoolParams {
    #[prost(string, tag = "1")]
    pub swap_fee: String,
    #[prost(string, tag = "2")]
    pub exit_fee: String,
    #[prost(message, optional, tag = "3")]
    pub smooth_weight_change_params: Option<SmoothWeightChangeParams>,
}

#[derive(Clone, PartialEq, Serialize, ::prost::Message)]
pub struct PoolAsset {
    #[prost(message, optional, tag = "1")]
    pub token: Option<Coin>,
    #[prost(string, tag = "2")]
    pub weight: String,
}

/// Linear weight migration schedule (LBP pools)
#[derive(Clone, PartialEq, Serialize, ::prost::Message)]
pub struct SmoothWeightChangeParams {
    #[prost(message, optional, tag = "1")]
    pub start_time: Option<Timestamp>,
    #[prost(message, optional, tag = "2")]
    pub duration: Option<Duration>,
    #[prost(message, repeated, tag = "3")]
    pub initial_pool_weights: Vec<PoolAsset>,
    #[prost(message, repeated, tag = "4")]
    pub target_pool_weights: Vec<PoolAsset>,
}

/// `osmosis.gamm.poolmodels.stableswap.v1beta1.Pool`
#[derive(Clone, PartialEq, Serialize, ::prost::Message)]
pub struct StableswapPool {
    #[prost(string, tag = "1")]
    pub address: String,
    #[prost(uint64, tag = "2")]
    pub id: u64,
    #[prost(message, optional, tag = "3")]
    pub pool_params: Option<StableswapPoolParams>,
    #[prost(string, tag = "4")]
    pub future_pool_governor: String,
    #[prost(message, optional, tag = "5")]
    pub total_shares: Option<Coin>,
    #[prost(message, repeated, tag = "6")]
    pub pool_liquidity: Vec<Coin>,
    #[prost(uint64, repeated, tag = "7")]
    pub scaling_factors: Vec<u64>,
    #[prost(string, tag = "8")]
    pub scaling_factor_controller: String,
}

#[derive(Clone, PartialEq, Serialize, ::prost::Message)]
pub struct StableswapPoolParams {
    #[prost(string, tag = "1")]
    pub swap_fee: String,
    #[prost(string, tag = "2")]
    pub exit_fee: String,
}
