//! Configuration file loading

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::shared::errors::ConfigError;
use crate::shared::types::AppConfig;

/// Loads `AppConfig` from TOML
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<AppConfig, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &AppConfig) -> Result<(), ConfigError> {
        if config.chain.id.trim().is_empty() {
            return Err(ConfigError::Invalid("chain.id must not be empty".to_string()));
        }
        if config.chain.node.trim().is_empty() {
            return Err(ConfigError::Invalid("chain.node must not be empty".to_string()));
        }
        if config.query.page_size == Some(0) {
            return Err(ConfigError::Invalid("query.page_size must be positive".to_string()));
        }
        if config.query.max_pages == Some(0) {
            return Err(ConfigError::Invalid("query.max_pages must be positive".to_string()));
        }
        Ok(())
    }
}
