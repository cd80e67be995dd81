// src/app.rs
use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::application::{fetch_balancer_pools, FetchOptions};
use crate::domain::pool::AllowListFilter;
use crate::infrastructure::cosmos::ContextBuilder;
use crate::report::PoolReport;
use crate::shared::types::{AppConfig, TransportKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Values given on the command line; `None` keeps the config file value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub chain_id: Option<String>,
    pub node: Option<String>,
    pub transport: Option<TransportKind>,
    pub home: Option<PathBuf>,
    pub keyring_backend: Option<String>,
    pub from: Option<String>,
    pub require_signer: bool,
    pub pool_ids: Option<BTreeSet<u64>>,
    /// Disable the allow-list even when the config lists ids
    pub all: bool,
    pub height: Option<u64>,
    pub page_size: Option<u64>,
    pub max_pages: Option<usize>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub config: AppConfig,
    pub filter: AllowListFilter,
    pub options: FetchOptions,
    pub output: OutputFormat,
}

impl AppCfg {
    /// Merge with priority CLI > config file > defaults
    pub fn resolve(base: AppConfig, cli: CliOverrides, output: OutputFormat) -> Self {
        let mut config = base;

        if let Some(chain_id) = cli.chain_id {
            config.chain.id = chain_id;
        }
        if let Some(node) = cli.node {
            config.chain.node = node;
        }
        if let Some(transport) = cli.transport {
            config.chain.transport = transport;
        }
        if let Some(timeout_ms) = cli.timeout_ms {
            config.chain.timeout_ms = timeout_ms;
        }
        if let Some(home) = cli.home {
            config.keyring.home = home;
        }
        if let Some(backend) = cli.keyring_backend {
            config.keyring.backend = backend;
        }
        if cli.from.is_some() {
            config.keyring.from = cli.from;
        }
        if cli.require_signer {
            config.keyring.require_signer = true;
        }
        if cli.height.is_some() {
            config.query.height = cli.height;
        }
        if cli.page_size.is_some() {
            config.query.page_size = cli.page_size;
        }
        if cli.max_pages.is_some() {
            config.query.max_pages = cli.max_pages;
        }
        // `--pool-ids` enables the filter even when it names no pool
        let cli_allow_list = cli.pool_ids.is_some();
        if let Some(ids) = cli.pool_ids {
            config.query.pool_ids = ids.into_iter().collect();
        }

        let filter = if cli.all || (!cli_allow_list && config.query.pool_ids.is_empty()) {
            AllowListFilter::disabled()
        } else {
            AllowListFilter::allow(config.query.pool_ids.iter().copied())
        };
        let options = FetchOptions {
            page_size: config.query.page_size,
            max_pages: config.query.max_pages,
        };

        Self {
            config,
            filter,
            options,
            output,
        }
    }
}

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    info!(
        "Querying GAMM pools on {} via {} ({})",
        app_cfg.config.chain.id, app_cfg.config.chain.node, app_cfg.config.chain.transport
    );

    let ctx = ContextBuilder::from_config(&app_cfg.config)
        .build()
        .await
        .context("build connection context")?;

    let pools = fetch_balancer_pools(&ctx, &app_cfg.filter, &app_cfg.options)
        .await
        .context("query pools")?;

    let report = PoolReport::new(ctx.chain_id(), ctx.node_uri(), ctx.height(), &app_cfg.filter, pools);
    match app_cfg.output {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json().context("serialize report")?),
    }
    Ok(())
}
