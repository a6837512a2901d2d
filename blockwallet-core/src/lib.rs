//! BlockWallet - Core library for Ethereum and Solana key generation
//!
//! Derives per-chain keypairs from a single BIP-39 mnemonic and looks up
//! balances through a thin JSON-RPC proxy. Nothing is persisted; a
//! [`WalletSession`] lives exactly as long as its owner keeps it.

pub mod config;
pub mod error;
pub mod rpc;
pub mod types;
pub mod validation;
pub mod wallet;

pub use config::{GatewayConfig, ProxyConfig, UpstreamConfig};
pub use error::{BlockWalletError, Result};
pub use rpc::{BalanceGateway, RpcProxy};
pub use types::{BalanceResult, Chain};
pub use validation::{is_valid, validate};
pub use wallet::{
    derive_keypair, generate_mnemonic, mnemonic_to_seed, parse_mnemonic, DerivationPath, Keypair,
    KeypairRegistry, Seed, WalletSession, WordCount,
};

pub use bip39::Mnemonic;
