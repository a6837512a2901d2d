pub mod balance;
pub mod proxy;
pub mod wallet;

pub use balance::{handle_balance_command, BalanceCommands};
pub use proxy::{handle_proxy_command, ProxyCommands};
pub use wallet::{handle_wallet_command, WalletCommands};
