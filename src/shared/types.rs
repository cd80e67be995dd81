//! Common types used across the application

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::errors::CredentialStoreError;

pub const DEFAULT_CHAIN_ID: &str = "osmosis-1";
pub const DEFAULT_NODE_URI: &str = "https://rpc.osmosis.zone:443";
pub const DEFAULT_ACCOUNT_PREFIX: &str = "osmo";
pub const DEFAULT_KEYRING_BACKEND: &str = "test";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Wire protocol used to reach the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Tendermint JSON-RPC `abci_query`
    #[default]
    Tendermint,
    /// Cosmos gRPC query service
    Grpc,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Tendermint => "tendermint",
            TransportKind::Grpc => "grpc",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cosmos keyring backend names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyringBackend {
    Test,
    Memory,
    Os,
    File,
    Kwallet,
    Pass,
}

impl KeyringBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyringBackend::Test => "test",
            KeyringBackend::Memory => "memory",
            KeyringBackend::Os => "os",
            KeyringBackend::File => "file",
            KeyringBackend::Kwallet => "kwallet",
            KeyringBackend::Pass => "pass",
        }
    }
}

impl FromStr for KeyringBackend {
    type Err = CredentialStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "test" => Ok(KeyringBackend::Test),
            "memory" => Ok(KeyringBackend::Memory),
            "os" => Ok(KeyringBackend::Os),
            "file" => Ok(KeyringBackend::File),
            "kwallet" => Ok(KeyringBackend::Kwallet),
            "pass" => Ok(KeyringBackend::Pass),
            other => Err(CredentialStoreError::UnknownBackend(other.to_string())),
        }
    }
}

/// Broadcast behaviour bundled into the context; unused by queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BroadcastMode {
    #[default]
    Async,
}

/// Whether a missing signing identity aborts context construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityPolicy {
    Required,
    #[default]
    Optional,
}

/// `[chain]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub id: String,
    pub node: String,
    pub transport: TransportKind,
    pub account_prefix: String,
    pub timeout_ms: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_CHAIN_ID.to_string(),
            node: DEFAULT_NODE_URI.to_string(),
            transport: TransportKind::Tendermint,
            account_prefix: DEFAULT_ACCOUNT_PREFIX.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// `[keyring]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyringConfig {
    pub home: PathBuf,
    pub backend: String,
    pub from: Option<String>,
    pub require_signer: bool,
}

impl Default for KeyringConfig {
    fn default() -> Self {
        Self {
            home: default_home_dir(),
            backend: DEFAULT_KEYRING_BACKEND.to_string(),
            from: None,
            require_signer: false,
        }
    }
}

/// `[query]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub height: Option<u64>,
    pub page_size: Option<u64>,
    pub max_pages: Option<usize>,
    /// Non-empty list enables the allow-list filter
    pub pool_ids: Vec<u64>,
}

/// Full application configuration (`Config.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub chain: ChainConfig,
    pub keyring: KeyringConfig,
    pub query: QueryConfig,
}

/// `$HOME/.osmosisd`, or `.osmosisd` relative to the working directory
pub fn default_home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".osmosisd")
}
