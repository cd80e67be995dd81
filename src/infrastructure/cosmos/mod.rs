//! Osmosis / Cosmos SDK chain access

pub mod context;
pub mod grpc_client;
pub mod keyring;
pub mod pool_structures;
pub mod proto;
pub mod registry;
pub mod tendermint_client;
pub mod transport;

pub use context::{ConnectionContext, ContextBuilder};
pub use grpc_client::GrpcQueryClient;
pub use keyring::{Identity, KeyRecord, Keyring};
pub use pool_structures::{BalancerPool, StableswapPool};
pub use registry::{EncodingConfig, InterfaceRegistry};
pub use tendermint_client::TendermintRpcClient;
pub use transport::PoolPageSource;
