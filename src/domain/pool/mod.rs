//! Pool domain - identities, variants and the allow-list filter

mod allow_list;
mod variant;

pub use allow_list::AllowListFilter;
pub use variant::{DecodedEnvelope, PoolKind, PoolVariant};

use std::collections::HashMap;

use crate::infrastructure::cosmos::pool_structures::BalancerPool;

/// On-chain pool number, stable for the pool's lifetime
pub type PoolId = u64;

/// Aggregated balancer pools keyed by their own id
pub type PoolSet = HashMap<PoolId, BalancerPool>;
