use crate::config::CliConfig;
use blockwallet_core::{Result, RpcProxy};
use clap::Subcommand;
use std::net::SocketAddr;

#[derive(Subcommand)]
pub enum ProxyCommands {
    /// Serve POST /api/eth and POST /api/sol until Ctrl-C
    Serve {
        /// Address to listen on
        #[arg(short, long)]
        listen: Option<SocketAddr>,
        /// Node provider API key, appended to both upstream URLs
        #[arg(long, env = "BLOCKWALLET_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
}

pub async fn handle_proxy_command(cmd: ProxyCommands, config: &CliConfig) -> Result<()> {
    match cmd {
        ProxyCommands::Serve { listen, api_key } => {
            let mut proxy_config = config.proxy.clone();
            if let Some(addr) = listen {
                proxy_config.listen_addr = addr;
            }
            if let Some(key) = api_key {
                proxy_config.set_api_key(key);
            }

            if proxy_config.eth_upstream.api_key.is_none()
                || proxy_config.sol_upstream.api_key.is_none()
            {
                tracing::warn!("No API key configured; upstream providers may reject requests");
            }

            println!("Ethereum upstream: {}", proxy_config.eth_upstream.url);
            println!("Solana upstream:   {}", proxy_config.sol_upstream.url);

            RpcProxy::new(proxy_config)?.serve().await?;
        }
    }

    Ok(())
}
