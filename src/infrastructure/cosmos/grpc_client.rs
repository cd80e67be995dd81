//! Cosmos gRPC query transport

use std::time::Duration;

use async_trait::async_trait;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::codegen::http::Uri;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tracing::{debug, info};

use crate::shared::errors::{ConnectionError, TransportError};
use super::proto::{PageRequest, QueryPoolsRequest, QueryPoolsResponse, POOLS_QUERY_PATH};
use super::transport::PoolPageSource;

/// Metadata key selecting the query height on cosmos gRPC servers
pub const BLOCK_HEIGHT_HEADER: &str = "x-cosmos-block-height";

/// gRPC client over a single `tonic` channel
#[derive(Clone)]
pub struct GrpcQueryClient {
    channel: Channel,
    uri: String,
    height: Option<u64>,
}

impl GrpcQueryClient {
    /// Connect eagerly to `uri` (TLS for `https`)
    pub async fn connect(
        uri: &str,
        timeout: Duration,
        height: Option<u64>,
    ) -> Result<Self, ConnectionError> {
        let parsed: Uri = uri.parse().map_err(|e: tonic::codegen::http::uri::InvalidUri| {
            ConnectionError::MalformedUri {
                uri: uri.to_string(),
                reason: e.to_string(),
            }
        })?;

        let mut endpoint = Endpoint::from(parsed.clone())
            .timeout(timeout)
            .connect_timeout(timeout);

        match parsed.scheme_str() {
            Some("http") => {}
            Some("https") => {
                endpoint = endpoint.tls_config(ClientTlsConfig::new()).map_err(|e| {
                    ConnectionError::MalformedUri {
                        uri: uri.to_string(),
                        reason: format!("tls config: {}", e),
                    }
                })?;
            }
            other => {
                return Err(ConnectionError::UnsupportedScheme {
                    scheme: other.unwrap_or("<none>").to_string(),
                    transport: "grpc".to_string(),
                })
            }
        }

        let channel = endpoint
            .connect()
            .await
            .map_err(|e| ConnectionError::Unreachable {
                uri: uri.to_string(),
                reason: e.to_string(),
            })?;

        info!("✅ Connected to gRPC endpoint {}", uri);
        Ok(Self {
            channel,
            uri: uri.to_string(),
            height,
        })
    }

    fn build_request(
        &self,
        pagination: PageRequest,
    ) -> Result<tonic::Request<QueryPoolsRequest>, TransportError> {
        let mut request = tonic::Request::new(QueryPoolsRequest {
            pagination: Some(pagination),
        });
        if let Some(height) = self.height {
            let value: MetadataValue<Ascii> = height
                .to_string()
                .parse()
                .map_err(|_| TransportError::InvalidRequest(format!("height {}", height)))?;
            request.metadata_mut().insert(BLOCK_HEIGHT_HEADER, value);
        }
        Ok(request)
    }
}

#[async_trait]
impl PoolPageSource for GrpcQueryClient {
    async fn fetch_pools_page(
        &self,
        pagination: PageRequest,
    ) -> Result<QueryPoolsResponse, TransportError> {
        let request = self.build_request(pagination)?;

        let mut grpc = tonic::client::Grpc::new(self.channel.clone());
        grpc.ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {}", e)))?;

        debug!(node = %self.uri, "grpc {}", POOLS_QUERY_PATH);
        let codec: ProstCodec<QueryPoolsRequest, QueryPoolsResponse> = ProstCodec::default();
        let response = grpc
            .unary(request, PathAndQuery::from_static(POOLS_QUERY_PATH), codec)
            .await?;
        Ok(response.into_inner())
    }

    fn endpoint(&self) -> &str {
        &self.uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_malformed_uri() {
        let result = GrpcQueryClient::connect("not a uri", Duration::from_secs(1), None).await;
        assert!(matches!(result, Err(ConnectionError::MalformedUri { .. })));
    }

    #[tokio::test]
    async fn test_unsupported_scheme() {
        let result =
            GrpcQueryClient::connect("ftp://grpc.osmosis.zone:9090", Duration::from_secs(1), None)
                .await;
        assert!(matches!(
            result,
            Err(ConnectionError::UnsupportedScheme { scheme, .. }) if scheme == "ftp"
        ));
    }
}
