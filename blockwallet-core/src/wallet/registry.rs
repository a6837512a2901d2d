use crate::types::Chain;
use serde::Serialize;

/// Public addresses generated during a session, one list per chain.
///
/// Append-only and in insertion order. Nothing here is persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeypairRegistry {
    solana: Vec<String>,
    ethereum: Vec<String>,
}

impl KeypairRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chain: Chain, address: String) {
        self.list_mut(chain).push(address);
    }

    pub fn addresses(&self, chain: Chain) -> &[String] {
        match chain {
            Chain::Solana => &self.solana,
            Chain::Ethereum => &self.ethereum,
        }
    }

    pub fn contains(&self, chain: Chain, address: &str) -> bool {
        self.addresses(chain).iter().any(|a| a == address)
    }

    pub fn len(&self) -> usize {
        self.solana.len() + self.ethereum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every address tagged with its chain, Solana first.
    pub fn iter(&self) -> impl Iterator<Item = (Chain, &str)> {
        Chain::ALL.into_iter().flat_map(move |chain| {
            self.addresses(chain)
                .iter()
                .map(move |address| (chain, address.as_str()))
        })
    }

    fn list_mut(&mut self, chain: Chain) -> &mut Vec<String> {
        match chain {
            Chain::Solana => &mut self.solana,
            Chain::Ethereum => &mut self.ethereum,
        }
    }
}
