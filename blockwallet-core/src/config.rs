use crate::error::{BlockWalletError, Result};
use crate::types::Chain;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the balance gateway sends its JSON-RPC requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub eth_endpoint: String,
    pub sol_endpoint: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::with_proxy_base("http://127.0.0.1:3000")
    }
}

impl GatewayConfig {
    /// Points both endpoints at a running proxy (`<base>/api/eth`, `<base>/api/sol`).
    pub fn with_proxy_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            eth_endpoint: format!("{}/api/eth", base),
            sol_endpoint: format!("{}/api/sol", base),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn endpoint(&self, chain: Chain) -> &str {
        match chain {
            Chain::Ethereum => &self.eth_endpoint,
            Chain::Solana => &self.sol_endpoint,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for chain in Chain::ALL {
            validate_url(self.endpoint(chain), &format!("{} endpoint", chain))?;
        }

        if self.timeout.is_zero() {
            return Err(BlockWalletError::config("Timeout must be greater than 0"));
        }

        Ok(())
    }
}

/// One upstream node provider.
#[derive(Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub url: String,
    /// Appended to `url` as the last path segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl UpstreamConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
        }
    }

    pub fn endpoint(&self) -> String {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => {
                format!("{}/{}", self.url.trim_end_matches('/'), key)
            }
            _ => self.url.clone(),
        }
    }
}

// keep the credential out of logs
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Settings for the pass-through JSON-RPC proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub listen_addr: SocketAddr,
    pub eth_upstream: UpstreamConfig,
    pub sol_upstream: UpstreamConfig,
    pub timeout: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            eth_upstream: UpstreamConfig::new("https://eth-mainnet.g.alchemy.com/v2"),
            sol_upstream: UpstreamConfig::new("https://solana-mainnet.g.alchemy.com/v2"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ProxyConfig {
    pub fn upstream(&self, chain: Chain) -> &UpstreamConfig {
        match chain {
            Chain::Ethereum => &self.eth_upstream,
            Chain::Solana => &self.sol_upstream,
        }
    }

    /// Uses the same credential for both providers.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        let api_key = api_key.into();
        self.eth_upstream.api_key = Some(api_key.clone());
        self.sol_upstream.api_key = Some(api_key);
    }

    pub fn validate(&self) -> Result<()> {
        for chain in Chain::ALL {
            validate_url(&self.upstream(chain).url, &format!("{} upstream URL", chain))?;
        }

        if self.timeout.is_zero() {
            return Err(BlockWalletError::config("Timeout must be greater than 0"));
        }

        Ok(())
    }
}

fn validate_url(url: &str, what: &str) -> Result<()> {
    if url.is_empty() {
        return Err(BlockWalletError::config(format!("{} cannot be empty", what)));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(BlockWalletError::config(format!(
            "{} must be an http(s) URL: {}",
            what, url
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.endpoint(Chain::Ethereum), "http://127.0.0.1:3000/api/eth");
        assert_eq!(config.endpoint(Chain::Solana), "http://127.0.0.1:3000/api/sol");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gateway_proxy_base_trims_slash() {
        let config = GatewayConfig::with_proxy_base("https://wallet.example.com/");
        assert_eq!(config.eth_endpoint, "https://wallet.example.com/api/eth");
    }

    #[test]
    fn test_gateway_validation() {
        let mut config = GatewayConfig::default();
        config.sol_endpoint = String::new();
        assert!(config.validate().is_err());

        let mut config = GatewayConfig::default();
        config.eth_endpoint = "ftp://node".to_string();
        assert!(config.validate().is_err());

        let mut config = GatewayConfig::default();
        config.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_upstream_endpoint_appends_key() {
        let mut upstream = UpstreamConfig::new("https://eth-mainnet.g.alchemy.com/v2/");
        assert_eq!(upstream.endpoint(), "https://eth-mainnet.g.alchemy.com/v2/");

        upstream.api_key = Some("secret-key".to_string());
        assert_eq!(
            upstream.endpoint(),
            "https://eth-mainnet.g.alchemy.com/v2/secret-key"
        );
        assert!(!format!("{:?}", upstream).contains("secret-key"));
    }

    #[test]
    fn test_proxy_config_roundtrip_and_key() {
        let mut config = ProxyConfig::default();
        config.set_api_key("k");
        assert!(config.validate().is_ok());
        assert_eq!(
            config.upstream(Chain::Solana).endpoint(),
            "https://solana-mainnet.g.alchemy.com/v2/k"
        );

        let partial: ProxyConfig =
            serde_json::from_str(r#"{"listen_addr":"0.0.0.0:8080"}"#).unwrap();
        assert_eq!(partial.listen_addr.port(), 8080);
        assert_eq!(partial.timeout, DEFAULT_TIMEOUT);
    }
}
