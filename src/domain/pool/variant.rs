//! Tagged pool variants decoded from `Any` envelopes

use serde::Serialize;

use crate::infrastructure::cosmos::pool_structures::{BalancerPool, StableswapPool};
use super::PoolId;

/// Pool model discriminator, one per registered type URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PoolKind {
    Balancer,
    StableSwap,
}

impl PoolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolKind::Balancer => "balancer",
            PoolKind::StableSwap => "stableswap",
        }
    }
}

/// A concrete, decoded pool
#[derive(Debug, Clone, PartialEq)]
pub enum PoolVariant {
    Balancer(BalancerPool),
    StableSwap(StableswapPool),
}

impl PoolVariant {
    pub fn kind(&self) -> PoolKind {
        match self {
            PoolVariant::Balancer(_) => PoolKind::Balancer,
            PoolVariant::StableSwap(_) => PoolKind::StableSwap,
        }
    }

    pub fn id(&self) -> PoolId {
        match self {
            PoolVariant::Balancer(pool) => pool.id,
            PoolVariant::StableSwap(pool) => pool.id,
        }
    }

    pub fn into_balancer(self) -> Option<BalancerPool> {
        match self {
            PoolVariant::Balancer(pool) => Some(pool),
            _ => None,
        }
    }
}

/// Outcome of unpacking one envelope
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedEnvelope {
    Recognized(PoolVariant),
    /// Type URL not present in the registry
    Unrecognized(String),
}
