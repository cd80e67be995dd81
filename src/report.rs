// src/report.rs
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::pool::{AllowListFilter, PoolId, PoolSet};
use crate::infrastructure::cosmos::BalancerPool;
use crate::shared::utils::format_dec;

/// Output of one catalog fetch
#[derive(Debug, Serialize)]
pub struct PoolReport {
    pub chain_id: String,
    pub node: String,
    /// `None` means the query ran at the latest height
    pub height: Option<u64>,
    /// Allow-listed ids, `None` when the filter is disabled
    pub allow_list: Option<Vec<PoolId>>,
    pub pool_count: usize,
    /// Sorted by pool id
    pub pools: Vec<BalancerPool>,
    pub timestamp: DateTime<Utc>,
}

impl PoolReport {
    pub fn new(
        chain_id: &str,
        node: &str,
        height: Option<u64>,
        filter: &AllowListFilter,
        pools: PoolSet,
    ) -> Self {
        let allow_list = filter.is_enabled().then(|| {
            let mut ids: Vec<PoolId> = filter.ids().iter().copied().collect();
            ids.sort_unstable();
            ids
        });

        let mut pools: Vec<BalancerPool> = pools.into_values().collect();
        pools.sort_by_key(|pool| pool.id);

        Self {
            chain_id: chain_id.to_string(),
            node: node.to_string(),
            height,
            allow_list,
            pool_count: pools.len(),
            pools,
            timestamp: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// One line per pool, preceded by a header line
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let height = self
            .height
            .map(|h| h.to_string())
            .unwrap_or_else(|| "latest".to_string());
        let _ = writeln!(
            out,
            "{} balancer pools on {} (height {}) via {}",
            self.pool_count, self.chain_id, height, self.node
        );

        for pool in &self.pools {
            let assets = pool
                .pool_assets
                .iter()
                .map(|asset| {
                    let (denom, amount) = asset
                        .token
                        .as_ref()
                        .map(|c| (c.denom.as_str(), c.amount.as_str()))
                        .unwrap_or(("?", "0"));
                    format!("{}{} (w={})", amount, denom, asset.weight)
                })
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                out,
                "pool {:>5}  {}  swap_fee={}  [{}]",
                pool.id,
                pool.address,
                pool.swap_fee().map(format_dec).unwrap_or_else(|| "-".to_string()),
                assets
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cosmos::pool_structures::{BalancerPoolParams, PoolAsset};
    use crate::infrastructure::cosmos::proto::Coin;

    fn pool(id: u64) -> BalancerPool {
        BalancerPool {
            address: format!("osmo1pool{}", id),
            id,
            pool_params: Some(BalancerPoolParams {
                swap_fee: "2000000000000000".to_string(),
                exit_fee: "0".to_string(),
                smooth_weight_change_params: None,
            }),
            pool_assets: vec![PoolAsset {
                token: Some(Coin {
                    denom: "uosmo".to_string(),
                    amount: "1000".to_string(),
                }),
                weight: "536870912000000".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_report_sorts_pools_and_records_filter() {
        let pools: PoolSet = [(3, pool(3)), (1, pool(1))].into_iter().collect();
        let report = PoolReport::new(
            "osmosis-1",
            "https://rpc.osmosis.zone:443",
            None,
            &AllowListFilter::allow([3, 1, 9]),
            pools,
        );

        assert_eq!(report.pool_count, 2);
        assert_eq!(report.pools.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(report.allow_list, Some(vec![1, 3, 9]));
        assert!(report.timestamp > Utc::now() - chrono::Duration::seconds(1));
    }

    #[test]
    fn test_text_output() {
        let pools: PoolSet = [(1, pool(1))].into_iter().collect();
        let report = PoolReport::new("osmosis-1", "node", Some(10), &AllowListFilter::disabled(), pools);

        let text = report.to_text();
        assert!(text.starts_with("1 balancer pools on osmosis-1 (height 10)"));
        assert!(text.contains("osmo1pool1"));
        assert!(text.contains("swap_fee=0.002"));
        assert!(text.contains("1000uosmo"));
    }

    #[test]
    fn test_json_output() {
        let report = PoolReport::new("osmosis-1", "node", None, &AllowListFilter::disabled(), PoolSet::new());
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["chain_id"], "osmosis-1");
        assert_eq!(json["pool_count"], 0);
        assert!(json["allow_list"].is_null());
        assert!(json["height"].is_null());
    }
}
