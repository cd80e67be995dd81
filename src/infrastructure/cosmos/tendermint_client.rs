//! Tendermint JSON-RPC transport (`abci_query`)

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use prost::Message;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::shared::errors::{ConnectionError, TransportError};
use super::proto::{PageRequest, QueryPoolsRequest, QueryPoolsResponse, POOLS_QUERY_PATH};
use super::transport::PoolPageSource;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AbciQueryResult {
    response: AbciQueryResponse,
}

#[derive(Debug, Deserialize)]
struct AbciQueryResponse {
    #[serde(default)]
    code: u32,
    #[serde(default)]
    log: String,
    #[serde(default)]
    codespace: String,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResult {
    node_info: NodeInfo,
}

#[derive(Debug, Deserialize)]
struct NodeInfo {
    network: String,
}

/// JSON-RPC client for a Tendermint / CometBFT node
pub struct TendermintRpcClient {
    client: Client,
    url: Url,
    uri: String,
    height: Option<u64>,
    next_id: AtomicU64,
}

impl TendermintRpcClient {
    /// Create a client for `uri`; no request is made yet
    pub fn new(uri: &str, timeout: Duration, height: Option<u64>) -> Result<Self, ConnectionError> {
        let url = Url::parse(uri).map_err(|e| ConnectionError::MalformedUri {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConnectionError::UnsupportedScheme {
                    scheme: other.to_string(),
                    transport: "tendermint".to_string(),
                })
            }
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConnectionError::Unreachable {
                uri: uri.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            url,
            uri: uri.to_string(),
            height,
            next_id: AtomicU64::new(1),
        })
    }

    /// Query `status` and return the node's network (chain id)
    pub async fn network(&self) -> Result<String, TransportError> {
        let status: StatusResult = self.call("status", json!({})).await?;
        Ok(status.node_info.network)
    }

    async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, TransportError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        read_rpc_body(status, &body)
    }
}

#[async_trait]
impl PoolPageSource for TendermintRpcClient {
    async fn fetch_pools_page(
        &self,
        pagination: PageRequest,
    ) -> Result<QueryPoolsResponse, TransportError> {
        let request = QueryPoolsRequest {
            pagination: Some(pagination),
        };
        let params = abci_query_params(&request, self.height);
        debug!(node = %self.uri, "abci_query {}", POOLS_QUERY_PATH);

        let result: AbciQueryResult = self.call("abci_query", params).await?;
        decode_abci_response(result.response)
    }

    fn endpoint(&self) -> &str {
        &self.uri
    }
}

fn abci_query_params(request: &QueryPoolsRequest, height: Option<u64>) -> serde_json::Value {
    json!({
        "path": POOLS_QUERY_PATH,
        "data": hex::encode(request.encode_to_vec()),
        "height": height.unwrap_or(0).to_string(),
        "prove": false,
    })
}

/// Longest body excerpt kept in an `HttpStatus` error
const BODY_EXCERPT_LEN: usize = 256;

/// Tendermint answers JSON-RPC errors with HTTP 500, so a body that parses
/// as JSON is interpreted before the status code is looked at
fn read_rpc_body<T: for<'de> Deserialize<'de>>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, TransportError> {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => parse_rpc_response(value),
        Err(_) if !status.is_success() => Err(TransportError::HttpStatus {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).chars().take(BODY_EXCERPT_LEN).collect(),
        }),
        Err(e) => Err(TransportError::MalformedResponse(e.to_string())),
    }
}

fn parse_rpc_response<T: for<'de> Deserialize<'de>>(
    body: serde_json::Value,
) -> Result<T, TransportError> {
    let response: RpcResponse<T> = serde_json::from_value(body)
        .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;

    if let Some(error) = response.error {
        let message = match error.data {
            Some(data) if !data.is_empty() => format!("{}: {}", error.message, data),
            _ => error.message,
        };
        return Err(TransportError::JsonRpc {
            code: error.code,
            message,
        });
    }

    response
        .result
        .ok_or_else(|| TransportError::MalformedResponse("missing result".to_string()))
}

fn decode_abci_response(response: AbciQueryResponse) -> Result<QueryPoolsResponse, TransportError> {
    if response.code != 0 {
        return Err(TransportError::Abci {
            code: response.code,
            codespace: response.codespace,
            log: response.log,
        });
    }

    let bytes = match response.value {
        Some(value) => BASE64
            .decode(value.as_bytes())
            .map_err(|e| TransportError::MalformedResponse(format!("base64 value: {}", e)))?,
        None => Vec::new(),
    };
    Ok(QueryPoolsResponse::decode(bytes.as_slice())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cosmos::pool_structures::{BalancerPool, BALANCER_POOL_TYPE_URL};
    use crate::infrastructure::cosmos::proto::{Any, PageResponse};

    fn abci_body(value: Option<String>, code: u32) -> serde_json::Value {
        let (log, codespace) = if code == 0 { ("", "") } else { ("invalid request", "sdk") };
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "response": {
                    "code": code,
                    "log": log,
                    "info": "",
                    "index": "0",
                    "key": null,
                    "value": value,
                    "proofOps": null,
                    "height": "9000",
                    "codespace": codespace
                }
            }
        })
    }

    #[test]
    fn test_decode_successful_abci_query() {
        let pool = BalancerPool { id: 1, ..Default::default() };
        let page = QueryPoolsResponse {
            pools: vec![Any::pack(BALANCER_POOL_TYPE_URL, &pool)],
            pagination: Some(PageResponse { next_key: vec![2], total: 0 }),
        };
        let body = abci_body(Some(BASE64.encode(page.encode_to_vec())), 0);

        let result: AbciQueryResult = parse_rpc_response(body).unwrap();
        let decoded = decode_abci_response(result.response).unwrap();
        assert_eq!(decoded, page);
    }

    #[test]
    fn test_null_value_is_empty_page() {
        let result: AbciQueryResult = parse_rpc_response(abci_body(None, 0)).unwrap();
        let decoded = decode_abci_response(result.response).unwrap();
        assert!(decoded.pools.is_empty());
        assert_eq!(decoded.next_key(), None);
    }

    #[test]
    fn test_nonzero_code_is_error() {
        let result: AbciQueryResult = parse_rpc_response(abci_body(None, 18)).unwrap();
        let err = decode_abci_response(result.response).unwrap_err();
        assert!(matches!(err, TransportError::Abci { code: 18, .. }));
    }

    #[test]
    fn test_jsonrpc_error_object() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32603, "message": "Internal error", "data": "height 5 is not available" }
        });
        let err = parse_rpc_response::<AbciQueryResult>(body).unwrap_err();
        match err {
            TransportError::JsonRpc { code, message } => {
                assert_eq!(code, -32603);
                assert!(message.contains("height 5"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_error_body_wins_over_http_status() {
        let body = br#"{"jsonrpc":"2.0","id":3,"error":{"code":-32603,"message":"Internal error","data":"codespace sdk code 18"}}"#;
        let err = read_rpc_body::<AbciQueryResult>(StatusCode::INTERNAL_SERVER_ERROR, body)
            .unwrap_err();
        assert!(matches!(err, TransportError::JsonRpc { code: -32603, .. }));
    }

    #[test]
    fn test_non_json_error_page_keeps_status() {
        let body = b"<html><body>502 Bad Gateway</body></html>";
        let err = read_rpc_body::<StatusResult>(StatusCode::BAD_GATEWAY, body).unwrap_err();
        match err {
            TransportError::HttpStatus { status, body } => {
                assert_eq!(status, 502);
                assert!(body.contains("Bad Gateway"));
            }
            other => panic!("unexpected {:?}", other),
        }

        let err = read_rpc_body::<StatusResult>(StatusCode::OK, b"not json").unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }

    #[test]
    fn test_success_body_is_parsed() {
        let body = br#"{"jsonrpc":"2.0","id":1,"result":{"node_info":{"network":"osmosis-1"}}}"#;
        let status: StatusResult = read_rpc_body(StatusCode::OK, body).unwrap();
        assert_eq!(status.node_info.network, "osmosis-1");
    }

    #[test]
    fn test_bad_base64_is_malformed() {
        let result: AbciQueryResult =
            parse_rpc_response(abci_body(Some("%%%".to_string()), 0)).unwrap();
        assert!(matches!(
            decode_abci_response(result.response),
            Err(TransportError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_query_params_encode_request() {
        let request = QueryPoolsRequest {
            pagination: Some(PageRequest { key: vec![0xab], ..Default::default() }),
        };
        let params = abci_query_params(&request, Some(42));
        assert_eq!(params["path"], POOLS_QUERY_PATH);
        assert_eq!(params["height"], "42");
        assert_eq!(params["prove"], false);
        // field 2 { field 1 bytes [0xab] }
        assert_eq!(params["data"], "12030a01ab");
    }

    #[test]
    fn test_status_network() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "node_info": { "network": "osmosis-1", "version": "0.37" }, "sync_info": {} }
        });
        let status: StatusResult = parse_rpc_response(body).unwrap();
        assert_eq!(status.node_info.network, "osmosis-1");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = TendermintRpcClient::new("ftp://node:26657", Duration::from_secs(1), None)
            .err()
            .unwrap();
        assert!(matches!(err, ConnectionError::UnsupportedScheme { .. }));

        let err = TendermintRpcClient::new("not a uri", Duration::from_secs(1), None)
            .err()
            .unwrap();
        assert!(matches!(err, ConnectionError::MalformedUri { .. }));
    }
}
