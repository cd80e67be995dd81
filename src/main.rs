use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use osmopools::app::{self, AppCfg, CliOverrides, OutputFormat};
use osmopools::shared::config::ConfigLoader;
use osmopools::shared::types::{AppConfig, TransportKind};
use osmopools::shared::utils::{parse_page_limit, parse_pool_ids};

#[derive(Parser, Debug)]
#[command(version, about = "Query the Osmosis GAMM pool catalog")]
struct Args {
    /// Path to config file (optional)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Chain id the node must serve
    #[arg(long)]
    chain_id: Option<String>,

    /// Node endpoint (Tendermint RPC or gRPC URI)
    #[arg(long)]
    node: Option<String>,

    /// Query transport
    #[arg(long, value_enum)]
    transport: Option<TransportKind>,

    /// Keyring home directory
    #[arg(long)]
    home: Option<PathBuf>,

    /// Keyring backend (test, memory)
    #[arg(long)]
    keyring_backend: Option<String>,

    /// Signing key name or address
    #[arg(long)]
    from: Option<String>,

    /// Fail if the --from key cannot be resolved
    #[arg(long)]
    require_signer: bool,

    /// Pool ids to keep (comma-separated); enables the allow-list
    #[arg(long, value_parser = parse_pool_ids, conflicts_with = "all")]
    pool_ids: Option<std::collections::BTreeSet<u64>>,

    /// Keep every balancer pool, ignoring configured pool ids
    #[arg(long)]
    all: bool,

    /// Query height (defaults to latest)
    #[arg(long)]
    height: Option<u64>,

    /// Entries per page
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    page_size: Option<u64>,

    /// Abort after this many pages
    #[arg(long, value_parser = parse_page_limit)]
    max_pages: Option<usize>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

impl From<&Args> for CliOverrides {
    fn from(args: &Args) -> Self {
        Self {
            chain_id: args.chain_id.clone(),
            node: args.node.clone(),
            transport: args.transport,
            home: args.home.clone(),
            keyring_backend: args.keyring_backend.clone(),
            from: args.from.clone(),
            require_signer: args.require_signer,
            pool_ids: args.pool_ids.clone(),
            all: args.all,
            height: args.height,
            page_size: args.page_size,
            max_pages: args.max_pages,
            timeout_ms: args.timeout_ms,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    // Load base configuration from file if provided
    let base_config = match &args.config {
        Some(path) => ConfigLoader::from_file(path)?,
        None => AppConfig::default(),
    };

    let app_cfg = AppCfg::resolve(base_config, CliOverrides::from(&args), args.output);
    app::run(app_cfg).await
}
