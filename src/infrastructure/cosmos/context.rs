//! Connection context - everything needed to address an Osmosis node

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::shared::errors::{ConnectionError, ContextError, IdentityResolutionError};
use crate::shared::types::{
    AppConfig, BroadcastMode, IdentityPolicy, KeyringBackend, TransportKind,
    DEFAULT_ACCOUNT_PREFIX, DEFAULT_KEYRING_BACKEND, DEFAULT_TIMEOUT_MS, default_home_dir,
};
use super::grpc_client::GrpcQueryClient;
use super::keyring::{Identity, Keyring};
use super::registry::EncodingConfig;
use super::tendermint_client::TendermintRpcClient;
use super::transport::PoolPageSource;

/// Immutable, cheaply clonable handle for issuing queries against one chain
#[derive(Clone)]
pub struct ConnectionContext {
    chain_id: String,
    node_uri: String,
    encoding: Arc<EncodingConfig>,
    keyring: Arc<Keyring>,
    transport: Arc<dyn PoolPageSource>,
    identity: Option<Identity>,
    height: Option<u64>,
    broadcast_mode: BroadcastMode,
    skip_confirmation: bool,
}

impl ConnectionContext {
    /// Query-only context over an already established transport
    pub fn new(chain_id: impl Into<String>, transport: Arc<dyn PoolPageSource>) -> Self {
        Self {
            chain_id: chain_id.into(),
            node_uri: transport.endpoint().to_string(),
            encoding: Arc::new(EncodingConfig::osmosis()),
            keyring: Arc::new(Keyring::in_memory()),
            transport,
            identity: None,
            height: None,
            broadcast_mode: BroadcastMode::Async,
            skip_confirmation: true,
        }
    }

    pub fn with_keyring(mut self, keyring: Keyring) -> Self {
        self.keyring = Arc::new(keyring);
        self
    }

    pub fn with_identity(mut self, identity: Option<Identity>) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_height(mut self, height: Option<u64>) -> Self {
        self.height = height;
        self
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn node_uri(&self) -> &str {
        &self.node_uri
    }

    pub fn encoding(&self) -> &EncodingConfig {
        &self.encoding
    }

    pub fn keyring(&self) -> &Keyring {
        &self.keyring
    }

    pub fn transport(&self) -> &dyn PoolPageSource {
        self.transport.as_ref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Query height; `None` means latest
    pub fn height(&self) -> Option<u64> {
        self.height
    }

    pub fn broadcast_mode(&self) -> BroadcastMode {
        self.broadcast_mode
    }

    pub fn skip_confirmation(&self) -> bool {
        self.skip_confirmation
    }
}

/// Builds a [`ConnectionContext`]: keyring, then transport, then identity
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    chain_id: String,
    node: String,
    transport: TransportKind,
    home: PathBuf,
    keyring_backend: String,
    from: Option<String>,
    identity_policy: IdentityPolicy,
    account_prefix: String,
    height: Option<u64>,
    timeout: Duration,
}

impl ContextBuilder {
    pub fn new(chain_id: impl Into<String>, node: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            node: node.into(),
            transport: TransportKind::Tendermint,
            home: default_home_dir(),
            keyring_backend: DEFAULT_KEYRING_BACKEND.to_string(),
            from: None,
            identity_policy: IdentityPolicy::Optional,
            account_prefix: DEFAULT_ACCOUNT_PREFIX.to_string(),
            height: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let policy = if config.keyring.require_signer {
            IdentityPolicy::Required
        } else {
            IdentityPolicy::Optional
        };
        Self::new(config.chain.id.clone(), config.chain.node.clone())
            .transport(config.chain.transport)
            .home(config.keyring.home.clone())
            .keyring_backend(config.keyring.backend.clone())
            .signer(config.keyring.from.clone())
            .identity_policy(policy)
            .account_prefix(config.chain.account_prefix.clone())
            .height(config.query.height)
            .timeout(Duration::from_millis(config.chain.timeout_ms))
    }

    pub fn transport(mut self, transport: TransportKind) -> Self {
        self.transport = transport;
        self
    }

    pub fn home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = home.into();
        self
    }

    pub fn keyring_backend(mut self, backend: impl Into<String>) -> Self {
        self.keyring_backend = backend.into();
        self
    }

    pub fn signer(mut self, from: Option<String>) -> Self {
        self.from = from;
        self
    }

    pub fn identity_policy(mut self, policy: IdentityPolicy) -> Self {
        self.identity_policy = policy;
        self
    }

    pub fn account_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.account_prefix = prefix.into();
        self
    }

    pub fn height(mut self, height: Option<u64>) -> Self {
        self.height = height;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn build(self) -> Result<ConnectionContext, ContextError> {
        let backend: KeyringBackend = self.keyring_backend.parse()?;
        let keyring = Keyring::open(backend, &self.home)?;

        let transport = self.connect().await?;

        let identity = resolve_identity(
            &keyring,
            self.from.as_deref(),
            &self.account_prefix,
            self.identity_policy,
        )?;

        info!(
            chain_id = %self.chain_id,
            node = %self.node,
            transport = %self.transport,
            keyring = backend.as_str(),
            from = identity.as_ref().map(|i| i.name.as_str()).unwrap_or("-"),
            "connection context ready"
        );

        Ok(ConnectionContext::new(self.chain_id, transport)
            .with_keyring(keyring)
            .with_identity(identity)
            .with_height(self.height))
    }

    async fn connect(&self) -> Result<Arc<dyn PoolPageSource>, ConnectionError> {
        match self.transport {
            TransportKind::Tendermint => {
                let client = TendermintRpcClient::new(&self.node, self.timeout, self.height)?;
                let network = client.network().await.map_err(|e| ConnectionError::Unreachable {
                    uri: self.node.clone(),
                    reason: e.to_string(),
                })?;
                if network != self.chain_id {
                    return Err(ConnectionError::ChainIdMismatch {
                        uri: self.node.clone(),
                        expected: self.chain_id.clone(),
                        actual: network,
                    });
                }
                Ok(Arc::new(client))
            }
            TransportKind::Grpc => {
                let client = GrpcQueryClient::connect(&self.node, self.timeout, self.height).await?;
                Ok(Arc::new(client))
            }
        }
    }
}

/// Resolve the signing identity under `policy`
///
/// No `from` value means no identity. Under `Optional` a missing key is
/// logged and dropped instead of failing.
pub fn resolve_identity(
    keyring: &Keyring,
    from: Option<&str>,
    account_prefix: &str,
    policy: IdentityPolicy,
) -> Result<Option<Identity>, IdentityResolutionError> {
    let Some(from) = from else {
        return Ok(None);
    };

    match keyring.resolve(from, account_prefix) {
        Ok(identity) => Ok(Some(identity)),
        Err(e) if policy == IdentityPolicy::Optional => {
            warn!("⚠️  {}; continuing without a signing identity", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
