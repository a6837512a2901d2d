use crate::error::{BlockWalletError, Result};
use crate::types::Chain;
use crate::wallet::{
    derive_keypair, generate_mnemonic, mnemonic_to_seed, parse_mnemonic, KeypairRegistry,
    WordCount,
};
use bip39::Mnemonic;

/// State behind one interactive wallet session.
///
/// Holds the mnemonic, the account counter shared by both chains and the
/// registry of generated addresses. Dropping the session forgets all of it.
#[derive(Default)]
pub struct WalletSession {
    mnemonic: Option<Mnemonic>,
    passphrase: String,
    next_index: u32,
    registry: KeypairRegistry,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_passphrase(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
            ..Self::default()
        }
    }

    pub fn generate_mnemonic(&mut self, word_count: WordCount) -> Result<&Mnemonic> {
        if self.mnemonic.is_some() {
            return Err(BlockWalletError::MnemonicAlreadyGenerated);
        }

        let mnemonic = generate_mnemonic(word_count)?;
        tracing::info!("Generated {}-word seed phrase", word_count.words());
        Ok(self.mnemonic.insert(mnemonic))
    }

    pub fn import_mnemonic(&mut self, phrase: &str) -> Result<&Mnemonic> {
        if self.mnemonic.is_some() {
            return Err(BlockWalletError::MnemonicAlreadyGenerated);
        }

        let mnemonic = parse_mnemonic(phrase)?;
        tracing::info!("Imported {}-word seed phrase", mnemonic.word_count());
        Ok(self.mnemonic.insert(mnemonic))
    }

    pub fn mnemonic(&self) -> Option<&Mnemonic> {
        self.mnemonic.as_ref()
    }

    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    pub fn registry(&self) -> &KeypairRegistry {
        &self.registry
    }

    /// Derives the next account for `chain` and records its address.
    ///
    /// The counter moves only when derivation succeeds.
    pub fn add_wallet(&mut self, chain: Chain) -> Result<String> {
        let mnemonic = self
            .mnemonic
            .as_ref()
            .ok_or(BlockWalletError::MnemonicMissing)?;

        let index = self.next_index;
        let next = index
            .checked_add(1)
            .ok_or_else(|| BlockWalletError::derivation("Account index exhausted"))?;

        let seed = mnemonic_to_seed(mnemonic, &self.passphrase);
        let keypair = derive_keypair(&seed, chain, index)?;
        tracing::info!("Added {} wallet #{} at {}", chain, index, keypair.path());

        let address = keypair.into_address();
        self.next_index = next;
        self.registry.push(chain, address.clone());

        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::{derive_keypair, mnemonic_to_seed, parse_mnemonic};

    const PHRASE: &str =
        "legal winner thank year wave sausage worth useful legal winner thank yellow";

    #[test]
    fn test_add_wallet_requires_mnemonic() {
        let mut session = WalletSession::new();
        let err = session.add_wallet(Chain::Solana).unwrap_err();
        assert!(matches!(err, BlockWalletError::MnemonicMissing));
        assert_eq!(session.next_index(), 0);
        assert!(session.registry().is_empty());
    }

    #[test]
    fn test_mnemonic_generated_once() {
        let mut session = WalletSession::new();
        let phrase = session
            .generate_mnemonic(WordCount::Twelve)
            .unwrap()
            .to_string();

        let err = session.generate_mnemonic(WordCount::Twelve).unwrap_err();
        assert!(matches!(err, BlockWalletError::MnemonicAlreadyGenerated));
        assert!(session.import_mnemonic(PHRASE).is_err());
        assert_eq!(session.mnemonic().unwrap().to_string(), phrase);
    }

    #[test]
    fn test_counter_shared_across_chains() {
        let mut session = WalletSession::new();
        session.import_mnemonic(PHRASE).unwrap();

        let sol0 = session.add_wallet(Chain::Solana).unwrap();
        let eth1 = session.add_wallet(Chain::Ethereum).unwrap();
        let sol2 = session.add_wallet(Chain::Solana).unwrap();
        assert_eq!(session.next_index(), 3);

        let seed = mnemonic_to_seed(&parse_mnemonic(PHRASE).unwrap(), "");
        assert_eq!(sol0, derive_keypair(&seed, Chain::Solana, 0).unwrap().address());
        assert_eq!(eth1, derive_keypair(&seed, Chain::Ethereum, 1).unwrap().address());
        assert_eq!(sol2, derive_keypair(&seed, Chain::Solana, 2).unwrap().address());

        assert_eq!(session.registry().addresses(Chain::Solana), [sol0, sol2]);
        assert_eq!(session.registry().addresses(Chain::Ethereum), [eth1]);
    }

    #[test]
    fn test_passphrase_changes_addresses() {
        let mut plain = WalletSession::new();
        plain.import_mnemonic(PHRASE).unwrap();
        let mut salted = WalletSession::with_passphrase("hunter2");
        salted.import_mnemonic(PHRASE).unwrap();

        let a = plain.add_wallet(Chain::Ethereum).unwrap();
        let b = salted.add_wallet(Chain::Ethereum).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_import_leaves_session_empty() {
        let mut session = WalletSession::new();
        assert!(session.import_mnemonic("definitely not valid").is_err());
        assert!(session.mnemonic().is_none());
        session.import_mnemonic(PHRASE).unwrap();
    }
}
