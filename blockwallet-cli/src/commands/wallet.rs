use crate::commands::balance::print_balance;
use crate::config::CliConfig;
use blockwallet_core::{
    derive_keypair, generate_mnemonic, mnemonic_to_seed, parse_mnemonic, BalanceGateway,
    BlockWalletError, Chain, Result, WalletSession, WordCount,
};
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::{Input, Password, Select};

#[derive(Subcommand)]
pub enum WalletCommands {
    /// Generate a new seed phrase
    Generate {
        /// Number of words (12 or 24)
        #[arg(short, long, default_value_t = 12)]
        words: usize,
    },
    /// Derive addresses from a seed phrase
    Derive {
        /// Chain (eth, sol)
        #[arg(short, long)]
        chain: Chain,
        /// How many consecutive accounts to derive
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
        /// First account index
        #[arg(short, long, default_value_t = 0)]
        start: u32,
        /// Seed phrase (will prompt if not provided)
        #[arg(short, long)]
        mnemonic: Option<String>,
        /// Optional BIP-39 passphrase
        #[arg(short, long, default_value = "")]
        passphrase: String,
    },
    /// Start an interactive wallet session
    Session,
}

pub async fn handle_wallet_command(cmd: WalletCommands, config: &CliConfig) -> Result<()> {
    match cmd {
        WalletCommands::Generate { words } => {
            let mnemonic = generate_mnemonic(WordCount::try_from(words)?)?;

            println!("IMPORTANT: Save your seed phrase securely!");
            println!("Seed phrase: {}", mnemonic);
        }

        WalletCommands::Derive {
            chain,
            count,
            start,
            mnemonic,
            passphrase,
        } => {
            let phrase = match mnemonic {
                Some(m) => m,
                None => prompt_secret("Enter seed phrase")?,
            };
            let seed = mnemonic_to_seed(&parse_mnemonic(&phrase)?, &passphrase);

            let end = start
                .checked_add(count)
                .ok_or_else(|| BlockWalletError::derivation("Account range overflows"))?;

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Index", "Path", "Address"]);

            for index in start..end {
                let keypair = derive_keypair(&seed, chain, index)?;
                table.add_row(vec![
                    index.to_string(),
                    keypair.path().to_string(),
                    keypair.address().to_string(),
                ]);
            }

            println!("{}", table);
        }

        WalletCommands::Session => run_session(config).await?,
    }

    Ok(())
}

const MENU: [&str; 7] = [
    "Generate seed phrase",
    "Import seed phrase",
    "Add Solana wallet",
    "Add Ethereum wallet",
    "Show wallets",
    "Check balance",
    "Quit",
];

async fn run_session(config: &CliConfig) -> Result<()> {
    let gateway = BalanceGateway::new(config.gateway.clone())?;
    let mut session = WalletSession::new();

    loop {
        let choice = Select::new()
            .with_prompt("BlockWallet")
            .items(&MENU)
            .default(0)
            .interact()
            .map_err(|e| BlockWalletError::dialog(e.to_string()))?;

        // a failed action is reported and the session carries on
        let outcome = match choice {
            0 => session
                .generate_mnemonic(WordCount::default())
                .map(|m| println!("Seed phrase: {}", m)),
            1 => match prompt_secret("Enter seed phrase") {
                Ok(phrase) => session
                    .import_mnemonic(&phrase)
                    .map(|m| println!("Imported {}-word seed phrase", m.word_count())),
                Err(e) => Err(e),
            },
            2 => add_wallet(&mut session, Chain::Solana),
            3 => add_wallet(&mut session, Chain::Ethereum),
            4 => {
                show_wallets(&session);
                Ok(())
            }
            5 => check_balance(&gateway, &session).await,
            _ => break,
        };

        if let Err(e) = outcome {
            eprintln!("Error: {}", e);
        }
        println!();
    }

    Ok(())
}

fn add_wallet(session: &mut WalletSession, chain: Chain) -> Result<()> {
    let address = session.add_wallet(chain)?;
    println!("New {} wallet: {}", chain, address);
    Ok(())
}

fn show_wallets(session: &WalletSession) {
    if session.registry().is_empty() {
        println!("No wallets yet.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Chain", "Address"]);
    for (chain, address) in session.registry().iter() {
        table.add_row(vec![chain.to_string(), address.to_string()]);
    }

    println!("{}", table);
}

async fn check_balance(gateway: &BalanceGateway, session: &WalletSession) -> Result<()> {
    let (chain, address) = match pick_wallet(session)? {
        Some(picked) => picked,
        None => prompt_address()?,
    };

    let balance = gateway.query_balance(&address, chain).await?;
    println!("Balance for {} ({}):", address, chain);
    print_balance(&balance);
    Ok(())
}

/// Lets the user pick one of the session's wallets. `None` means they chose
/// to type an address instead.
fn pick_wallet(session: &WalletSession) -> Result<Option<(Chain, String)>> {
    let wallets: Vec<(Chain, &str)> = session.registry().iter().collect();
    if wallets.is_empty() {
        return Ok(None);
    }

    let selected = Select::new()
        .with_prompt("Wallet")
        .items(&wallet_menu(&wallets))
        .default(0)
        .interact()
        .map_err(|e| BlockWalletError::dialog(e.to_string()))?;

    Ok(wallet_choice(&wallets, selected))
}

const OTHER_ADDRESS: &str = "Other address...";

fn wallet_menu(wallets: &[(Chain, &str)]) -> Vec<String> {
    wallets
        .iter()
        .map(|(chain, address)| format!("{} {}", chain.ticker(), address))
        .chain(std::iter::once(OTHER_ADDRESS.to_string()))
        .collect()
}

fn wallet_choice(wallets: &[(Chain, &str)], selected: usize) -> Option<(Chain, String)> {
    wallets
        .get(selected)
        .map(|(chain, address)| (*chain, address.to_string()))
}

fn prompt_address() -> Result<(Chain, String)> {
    let selected = Select::new()
        .with_prompt("Chain")
        .items(&["Ethereum", "Solana"])
        .default(0)
        .interact()
        .map_err(|e| BlockWalletError::dialog(e.to_string()))?;
    let chain = if selected == 0 {
        Chain::Ethereum
    } else {
        Chain::Solana
    };

    let address: String = Input::new()
        .with_prompt("Address")
        .interact_text()
        .map_err(|e| BlockWalletError::dialog(e.to_string()))?;

    Ok((chain, address.trim().to_string()))
}

fn prompt_secret(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| BlockWalletError::dialog(e.to_string()))
}
