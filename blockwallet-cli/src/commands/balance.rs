use crate::config::CliConfig;
use blockwallet_core::{
    validation, BalanceGateway, BalanceResult, Chain, GatewayConfig, Result,
};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum BalanceCommands {
    /// Query the balance of an address
    Check {
        /// Address to look up
        address: String,
        /// Chain (eth, sol)
        #[arg(short, long)]
        chain: Chain,
        /// Base URL of a running proxy, overrides the configured endpoints
        #[arg(long)]
        proxy_url: Option<String>,
    },
    /// Check whether an address is well-formed, without any network call
    Validate {
        /// Address to check
        address: String,
        /// Chain (eth, sol)
        #[arg(short, long)]
        chain: Chain,
    },
}

pub async fn handle_balance_command(cmd: BalanceCommands, config: &CliConfig) -> Result<()> {
    match cmd {
        BalanceCommands::Check {
            address,
            chain,
            proxy_url,
        } => {
            let gateway_config = match proxy_url {
                Some(url) => GatewayConfig {
                    timeout: config.gateway.timeout,
                    ..GatewayConfig::with_proxy_base(&url)
                },
                None => config.gateway.clone(),
            };

            let gateway = BalanceGateway::new(gateway_config)?;
            let balance = gateway.query_balance(&address, chain).await?;

            println!("Balance for {} ({}):", address, chain);
            print_balance(&balance);
        }

        BalanceCommands::Validate { address, chain } => {
            validation::validate(&address, chain)?;
            println!("'{}' is a valid {} address", address, chain);
        }
    }

    Ok(())
}

pub fn print_balance(balance: &BalanceResult) {
    let (unit, ticker) = match balance.chain() {
        Chain::Ethereum => ("wei", "ETH"),
        Chain::Solana => ("lamports", "SOL"),
    };

    println!("  {} {}", balance.base_units(), unit);
    println!("  {} {}", balance.to_decimal_string(), ticker);
    println!("  ~{:.4} {}", balance.approximate(), ticker);
}
