use crate::error::{BlockWalletError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Supported chains.
///
/// On the wire (and inside derivation paths) a chain is its SLIP-44 coin
/// type: 60 for Ethereum, 501 for Solana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Chain {
    Ethereum,
    Solana,
}

impl Chain {
    pub const ALL: [Chain; 2] = [Chain::Solana, Chain::Ethereum];

    pub fn coin_type(self) -> u32 {
        match self {
            Chain::Ethereum => 60,
            Chain::Solana => 501,
        }
    }

    pub fn ticker(self) -> &'static str {
        match self {
            Chain::Ethereum => "ETH",
            Chain::Solana => "SOL",
        }
    }

    /// Decimal places between the base unit (wei, lamports) and the coin.
    pub fn decimals(self) -> u32 {
        match self {
            Chain::Ethereum => 18,
            Chain::Solana => 9,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chain::Ethereum => write!(f, "Ethereum"),
            Chain::Solana => write!(f, "Solana"),
        }
    }
}

impl TryFrom<u32> for Chain {
    type Error = BlockWalletError;

    fn try_from(coin_type: u32) -> Result<Self> {
        match coin_type {
            60 => Ok(Chain::Ethereum),
            501 => Ok(Chain::Solana),
            other => Err(BlockWalletError::config(format!(
                "Unsupported coin type: {}. Supported: 60 (Ethereum), 501 (Solana)",
                other
            ))),
        }
    }
}

impl From<Chain> for u32 {
    fn from(chain: Chain) -> Self {
        chain.coin_type()
    }
}

impl FromStr for Chain {
    type Err = BlockWalletError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "eth" | "ethereum" | "60" => Ok(Chain::Ethereum),
            "sol" | "solana" | "501" => Ok(Chain::Solana),
            _ => Err(BlockWalletError::config(format!(
                "Invalid chain: {}. Supported chains: eth, sol",
                s
            ))),
        }
    }
}

/// Balance of one address as reported by the upstream node.
///
/// `ether` and `sol` are floating-point conveniences and may round; use
/// [`BalanceResult::to_decimal_string`] for an exact figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "chain", rename_all = "lowercase")]
pub enum BalanceResult {
    Ethereum { wei: u128, ether: f64 },
    Solana { lamports: u64, sol: f64 },
}

impl BalanceResult {
    pub fn from_wei(wei: u128) -> Self {
        Self::Ethereum {
            wei,
            ether: wei as f64 / WEI_PER_ETHER as f64,
        }
    }

    pub fn from_lamports(lamports: u64) -> Self {
        Self::Solana {
            lamports,
            sol: lamports as f64 / LAMPORTS_PER_SOL as f64,
        }
    }

    pub fn chain(&self) -> Chain {
        match self {
            BalanceResult::Ethereum { .. } => Chain::Ethereum,
            BalanceResult::Solana { .. } => Chain::Solana,
        }
    }

    /// Amount in the chain's smallest unit.
    pub fn base_units(&self) -> u128 {
        match self {
            BalanceResult::Ethereum { wei, .. } => *wei,
            BalanceResult::Solana { lamports, .. } => u128::from(*lamports),
        }
    }

    pub fn approximate(&self) -> f64 {
        match self {
            BalanceResult::Ethereum { ether, .. } => *ether,
            BalanceResult::Solana { sol, .. } => *sol,
        }
    }

    pub fn to_decimal_string(&self) -> String {
        let chain = self.chain();
        format_units(self.base_units(), chain.decimals())
    }
}

impl fmt::Display for BalanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_decimal_string(), self.chain().ticker())
    }
}

/// Exact decimal rendering of `value / 10^decimals`, trailing zeros trimmed.
pub fn format_units(value: u128, decimals: u32) -> String {
    let scale = 10u128.pow(decimals);
    let whole = value / scale;
    let frac = value % scale;

    if frac == 0 {
        return whole.to_string();
    }

    let frac = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
