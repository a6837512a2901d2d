//! Syntactic address checks, run before any balance query.
//!
//! These only look at the shape of the string. An Ethereum address with
//! wrong checksum casing passes, and so does a Solana string that is not a
//! point on the curve.

use crate::error::{BlockWalletError, Result};
use crate::types::Chain;

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

pub fn is_valid(address: &str, chain: Chain) -> bool {
    match chain {
        Chain::Ethereum => is_valid_ethereum(address),
        Chain::Solana => is_valid_solana(address),
    }
}

pub fn validate(address: &str, chain: Chain) -> Result<()> {
    if is_valid(address, chain) {
        Ok(())
    } else {
        Err(BlockWalletError::validation(chain, address))
    }
}

fn is_valid_ethereum(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn is_valid_solana(address: &str) -> bool {
    (32..=44).contains(&address.len()) && address.chars().all(|c| BASE58_ALPHABET.contains(c))
}
