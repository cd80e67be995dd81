//! Interface registry - type URL to pool model resolution

use std::collections::HashMap;

use prost::Message;

use crate::domain::pool::{DecodedEnvelope, PoolKind, PoolVariant};
use super::pool_structures::{
    BalancerPool, StableswapPool, BALANCER_POOL_TYPE_URL, STABLESWAP_POOL_TYPE_URL,
};
use super::proto::Any;

/// Maps `Any` type URLs to the pool models this crate can decode
#[derive(Debug, Clone, Default)]
pub struct InterfaceRegistry {
    kinds: HashMap<String, PoolKind>,
}

impl InterfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every GAMM pool model known to this crate
    pub fn osmosis() -> Self {
        let mut registry = Self::new();
        registry.register(BALANCER_POOL_TYPE_URL, PoolKind::Balancer);
        registry.register(STABLESWAP_POOL_TYPE_URL, PoolKind::StableSwap);
        registry
    }

    pub fn register(&mut self, type_url: &str, kind: PoolKind) {
        self.kinds.insert(type_url.to_string(), kind);
    }

    pub fn resolve(&self, type_url: &str) -> Option<PoolKind> {
        self.kinds.get(type_url).copied()
    }

    /// Decode an envelope into its registered variant
    ///
    /// Unregistered type URLs yield `Unrecognized`; a registered type URL
    /// whose payload fails to decode is an error.
    pub fn unpack(&self, any: &Any) -> Result<DecodedEnvelope, prost::DecodeError> {
        let Some(kind) = self.resolve(&any.type_url) else {
            return Ok(DecodedEnvelope::Unrecognized(any.type_url.clone()));
        };

        let variant = match kind {
            PoolKind::Balancer => PoolVariant::Balancer(BalancerPool::decode(any.value.as_slice())?),
            PoolKind::StableSwap => {
                PoolVariant::StableSwap(StableswapPool::decode(any.value.as_slice())?)
            }
        };
        Ok(DecodedEnvelope::Recognized(variant))
    }
}

/// Encoding configuration bundled into a connection context
#[derive(Debug, Clone, Default)]
pub struct EncodingConfig {
    pub interface_registry: InterfaceRegistry,
}

impl EncodingConfig {
    pub fn osmosis() -> Self {
        Self {
            interface_registry: InterfaceRegistry::osmosis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cosmos::pool_structures::StableswapPoolParams;

    fn balancer(id: u64) -> BalancerPool {
        BalancerPool {
            address: format!("osmo1pool{}", id),
            id,
            ..Default::default()
        }
    }

    #[test]
    fn test_unpack_balancer() {
        let registry = InterfaceRegistry::osmosis();
        let any = Any::pack(BALANCER_POOL_TYPE_URL, &balancer(7));

        let decoded = registry.unpack(&any).unwrap();
        assert_eq!(decoded, DecodedEnvelope::Recognized(PoolVariant::Balancer(balancer(7))));
    }

    #[test]
    fn test_unpack_stableswap_is_not_balancer() {
        let registry = InterfaceRegistry::osmosis();
        let pool = StableswapPool {
            id: 9,
            pool_params: Some(StableswapPoolParams {
                swap_fee: "1000000000000000".to_string(),
                exit_fee: "0".to_string(),
            }),
            scaling_factors: vec![1, 1],
            ..Default::default()
        };
        let any = Any::pack(STABLESWAP_POOL_TYPE_URL, &pool);

        match registry.unpack(&any).unwrap() {
            DecodedEnvelope::Recognized(variant) => {
                assert_eq!(variant.kind(), PoolKind::StableSwap);
                assert_eq!(variant.id(), 9);
                assert!(variant.into_balancer().is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unpack_unknown_type_url() {
        let registry = InterfaceRegistry::osmosis();
        let any = Any {
            type_url: "/osmosis.concentratedliquidity.v1beta1.Pool".to_string(),
            value: vec![0xff, 0xff],
        };
        assert_eq!(
            registry.unpack(&any).unwrap(),
            DecodedEnvelope::Unrecognized("/osmosis.concentratedliquidity.v1beta1.Pool".to_string())
        );
    }

    #[test]
    fn test_unpack_malformed_payload_errors() {
        let registry = InterfaceRegistry::osmosis();
        // field 2 (id) declared as varint but truncated
        let any = Any {
            type_url: BALANCER_POOL_TYPE_URL.to_string(),
            value: vec![0x10, 0xff],
        };
        assert!(registry.unpack(&any).is_err());
    }

    #[test]
    fn test_empty_registry_recognizes_nothing() {
        let registry = InterfaceRegistry::new();
        let any = Any::pack(BALANCER_POOL_TYPE_URL, &balancer(1));
        assert!(matches!(registry.unpack(&any).unwrap(), DecodedEnvelope::Unrecognized(_)));
    }
}
