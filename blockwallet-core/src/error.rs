use crate::types::Chain;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlockWalletError>;

#[derive(Error, Debug)]
pub enum BlockWalletError {
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Derivation error: {0}")]
    Derivation(String),

    #[error("Invalid {chain} address: {address}")]
    Validation { chain: Chain, address: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("RPC error: {message}")]
    Rpc { code: Option<i64>, message: String },

    #[error("Seed phrase already generated")]
    MnemonicAlreadyGenerated,

    #[error("No seed phrase, generate or import one first")]
    MnemonicMissing,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),
}

impl BlockWalletError {
    pub fn entropy(msg: impl Into<String>) -> Self {
        Self::EntropyUnavailable(msg.into())
    }

    pub fn mnemonic(msg: impl Into<String>) -> Self {
        Self::InvalidMnemonic(msg.into())
    }

    pub fn derivation(msg: impl Into<String>) -> Self {
        Self::Derivation(msg.into())
    }

    pub fn validation(chain: Chain, address: impl Into<String>) -> Self {
        Self::Validation {
            chain,
            address: address.into(),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// RPC failure without an upstream error code (malformed or incomplete response).
    pub fn rpc(msg: impl Into<String>) -> Self {
        Self::Rpc {
            code: None,
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn dialog(msg: impl Into<String>) -> Self {
        Self::Dialog(msg.into())
    }
}

// reqwest errors only surface from transport: connect, timeout, body read.
// The URL is stripped since upstream URLs carry the provider key.
impl From<reqwest::Error> for BlockWalletError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            BlockWalletError::Network(format!("request timed out: {}", err))
        } else {
            BlockWalletError::Network(err.to_string())
        }
    }
}
