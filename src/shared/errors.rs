//! Error handling for the application

use std::path::PathBuf;

use thiserror::Error;

/// Credential store (keyring) errors
#[derive(Error, Debug)]
pub enum CredentialStoreError {
    #[error("Unknown keyring backend: {0}")]
    UnknownBackend(String),

    #[error("Keyring backend not supported: {0}")]
    UnsupportedBackend(String),

    #[error("Keyring location {path} is inaccessible: {source}")]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed key record {path}: {reason}")]
    MalformedRecord { path: PathBuf, reason: String },
}

/// Transport endpoint errors raised while building a context
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Malformed endpoint URI {uri}: {reason}")]
    MalformedUri { uri: String, reason: String },

    #[error("Unsupported endpoint scheme {scheme} for {transport} transport")]
    UnsupportedScheme { scheme: String, transport: String },

    #[error("Endpoint {uri} unreachable: {reason}")]
    Unreachable { uri: String, reason: String },

    #[error("Node {uri} serves chain {actual}, expected {expected}")]
    ChainIdMismatch {
        uri: String,
        expected: String,
        actual: String,
    },
}

/// Signing identity lookup errors
#[derive(Error, Debug)]
pub enum IdentityResolutionError {
    #[error("Key {0} not found in keyring")]
    NotFound(String),
}

/// Failure to assemble a connection context
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Credential store error: {0}")]
    CredentialStore(#[from] CredentialStoreError),

    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Identity resolution error: {0}")]
    IdentityResolution(#[from] IdentityResolutionError),
}

/// Low-level failure of a single query round trip
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("gRPC status: {0}")]
    Grpc(#[from] tonic::Status),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc { code: i64, message: String },

    #[error("ABCI query failed with code {code} ({codespace}): {log}")]
    Abci {
        code: u32,
        codespace: String,
        log: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Aggregation failure (`QueryFailure`); no partial result accompanies it
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Fetching page {page} failed: {source}")]
    PageFetch {
        page: usize,
        #[source]
        source: TransportError,
    },

    #[error("Malformed {type_url} payload on page {page}: {source}")]
    MalformedEnvelope {
        page: usize,
        type_url: String,
        #[source]
        source: prost::DecodeError,
    },

    #[error("Page limit of {max_pages} exceeded before the catalog was exhausted")]
    PageLimitExceeded { max_pages: usize },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
