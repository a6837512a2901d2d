mod commands;
mod config;

use blockwallet_core::BlockWalletError;
use clap::{Parser, Subcommand};
use config::CliConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blockwallet")]
#[command(about = "BlockWallet - Ethereum and Solana HD wallet")]
#[command(version)]
struct Cli {
    /// Path to a JSON config file
    #[arg(short = 'C', long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed phrase and key derivation commands
    #[command(subcommand)]
    Wallet(commands::WalletCommands),

    /// Balance and address commands
    #[command(subcommand)]
    Balance(commands::BalanceCommands),

    /// JSON-RPC proxy commands
    #[command(subcommand)]
    Proxy(commands::ProxyCommands),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "blockwallet={}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Wallet(cmd) => commands::handle_wallet_command(cmd, &config).await,
        Commands::Balance(cmd) => commands::handle_balance_command(cmd, &config).await,
        Commands::Proxy(cmd) => commands::handle_proxy_command(cmd, &config).await,
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn report(e: &BlockWalletError) {
    match e {
        BlockWalletError::Validation { chain, address } => {
            eprintln!("Error: '{}' is not a valid {} address", address, chain);
        }
        BlockWalletError::MnemonicMissing => {
            eprintln!("Error: Please generate or import a seed phrase first");
        }
        BlockWalletError::MnemonicAlreadyGenerated => {
            eprintln!("Error: Seed phrase already generated");
        }
        BlockWalletError::Network(msg) => {
            eprintln!("Error: Could not reach the balance endpoint: {}", msg);
            eprintln!("Is the proxy running? Start it with 'blockwallet proxy serve'");
        }
        BlockWalletError::Rpc {
            code: Some(code),
            message,
        } => {
            eprintln!("Error: Node rejected the request ({}): {}", code, message);
        }
        _ => {
            eprintln!("Error: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_balance_check() {
        let cli = Cli::try_parse_from([
            "blockwallet",
            "balance",
            "check",
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "--chain",
            "eth",
            "-C",
            "/tmp/blockwallet.json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/blockwallet.json")));
        match cli.command {
            Commands::Balance(commands::BalanceCommands::Check { chain, proxy_url, .. }) => {
                assert_eq!(chain, blockwallet_core::Chain::Ethereum);
                assert!(proxy_url.is_none());
            }
            _ => panic!("expected balance check"),
        }
    }

    #[test]
    fn test_parse_short_chain_flags() {
        let cli = Cli::try_parse_from(["blockwallet", "balance", "validate", "So1", "-c", "sol"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Balance(commands::BalanceCommands::Validate { .. })
        ));

        let cli = Cli::try_parse_from([
            "blockwallet",
            "wallet",
            "derive",
            "--chain",
            "sol",
            "-n",
            "3",
            "--mnemonic",
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        ])
        .unwrap();
        match cli.command {
            Commands::Wallet(commands::WalletCommands::Derive {
                chain,
                count,
                start,
                passphrase,
                ..
            }) => {
                assert_eq!(chain, blockwallet_core::Chain::Solana);
                assert_eq!(count, 3);
                assert_eq!(start, 0);
                assert!(passphrase.is_empty());
            }
            _ => panic!("expected wallet derive"),
        }

        assert!(Cli::try_parse_from(["blockwallet", "wallet", "derive", "--chain", "btc"]).is_err());
    }

    #[test]
    fn test_parse_proxy_serve() {
        let cli = Cli::try_parse_from([
            "blockwallet",
            "proxy",
            "serve",
            "--api-key",
            "k",
            "--listen",
            "0.0.0.0:8080",
        ])
        .unwrap();
        match cli.command {
            Commands::Proxy(commands::ProxyCommands::Serve { listen, api_key }) => {
                assert_eq!(api_key.as_deref(), Some("k"));
                assert_eq!(listen.map(|a| a.port()), Some(8080));
            }
            _ => panic!("expected proxy serve"),
        }
    }
}
