//! Protobuf wire types for the GAMM pools query
//!
//! Hand-maintained `prost` messages mirroring `cosmos.base.query.v1beta1`,
//! `cosmos.base.v1beta1`, `google.protobuf` and `osmosis.gamm.v1beta1`.
//! Only the fields this crate reads are declared; unknown fields are skipped
//! by the decoder.

use serde::Serialize;

/// gRPC / ABCI path of the paginated pools query
pub const POOLS_QUERY_PATH: &str = "/osmosis.gamm.v1beta1.Query/Pools";

/// `google.protobuf.Any` - type URL plus serialized payload
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Any {
    #[prost(string, tag = "1")]
    pub type_url: String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

impl Any {
    /// Wrap an encoded message under `type_url`
    pub fn pack<M: prost::Message>(type_url: &str, message: &M) -> Self {
        Self {
            type_url: type_url.to_string(),
            value: message.encode_to_vec(),
        }
    }
}

/// `cosmos.base.query.v1beta1.PageRequest`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PageRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub key: Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub offset: u64,
    #[prost(uint64, tag = "3")]
    pub limit: u64,
    #[prost(bool, tag = "4")]
    pub count_total: bool,
    #[prost(bool, tag = "5")]
    pub reverse: bool,
}

/// `cosmos.base.query.v1beta1.PageResponse`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PageResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub next_key: Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub total: u64,
}

/// `osmosis.gamm.v1beta1.QueryPoolsRequest`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryPoolsRequest {
    #[prost(message, optional, tag = "2")]
    pub pagination: Option<PageRequest>,
}

/// `osmosis.gamm.v1beta1.QueryPoolsResponse`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryPoolsResponse {
    #[prost(message, repeated, tag = "1")]
    pub pools: Vec<Any>,
    #[prost(message, optional, tag = "2")]
    pub pagination: Option<PageResponse>,
}

impl QueryPoolsResponse {
    /// Continuation key for the next page, `None` once the catalog is exhausted
    pub fn next_key(&self) -> Option<&[u8]> {
        self.pagination
            .as_ref()
            .map(|p| p.next_key.as_slice())
            .filter(|key| !key.is_empty())
    }
}

/// `cosmos.base.v1beta1.Coin`
#[derive(Clone, PartialEq, Eq, Serialize, ::prost::Message)]
pub struct Coin {
    #[prost(string, tag = "1")]
    pub denom: String,
    #[prost(string, tag = "2")]
    pub amount: String,
}

/// `google.protobuf.Timestamp`
#[derive(Clone, PartialEq, Eq, Serialize, ::prost::Message)]
pub struct Timestamp {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

/// `google.protobuf.Duration`
#[derive(Clone, PartialEq, Eq, Serialize, ::prost::Message)]
pub struct Duration {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}
