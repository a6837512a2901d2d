use anyhow::{Context, Result};
use blockwallet_core::{GatewayConfig, ProxyConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of `config.json`. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub gateway: GatewayConfig,
    pub proxy: ProxyConfig,
}

impl CliConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("blockwallet")
            .join("config.json")
    }

    /// Loads `path` if given, otherwise the default location. A missing
    /// default file means defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !explicit && !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: CliConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.gateway.validate().context("Invalid gateway config")?;
        config.proxy.validate().context("Invalid proxy config")?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
