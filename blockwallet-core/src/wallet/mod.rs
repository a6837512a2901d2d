pub mod derivation;
pub mod ed25519;
pub mod registry;
pub mod secp256k1;
pub mod session;

pub use derivation::{derive_keypair, DerivationPath, Keypair};
pub use registry::KeypairRegistry;
pub use session::WalletSession;

use crate::error::{BlockWalletError, Result};
use bip39::rand::{rngs::OsRng, RngCore};
use bip39::{Language, Mnemonic};
use zeroize::Zeroizing;

/// Mnemonic length. 12 words carry 128 bits of entropy, 24 words 256 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordCount {
    #[default]
    Twelve,
    TwentyFour,
}

impl WordCount {
    pub fn words(self) -> usize {
        match self {
            WordCount::Twelve => 12,
            WordCount::TwentyFour => 24,
        }
    }

    fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::TwentyFour => 32,
        }
    }
}

impl TryFrom<usize> for WordCount {
    type Error = BlockWalletError;

    fn try_from(words: usize) -> Result<Self> {
        match words {
            12 => Ok(WordCount::Twelve),
            24 => Ok(WordCount::TwentyFour),
            other => Err(BlockWalletError::config(format!(
                "Unsupported mnemonic length: {} words. Supported: 12, 24",
                other
            ))),
        }
    }
}

/// BIP-39 seed. Wiped from memory when dropped.
pub struct Seed(Zeroizing<[u8; 64]>);

impl Seed {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

pub fn generate_mnemonic(word_count: WordCount) -> Result<Mnemonic> {
    let mut entropy = Zeroizing::new(vec![0u8; word_count.entropy_bytes()]);
    OsRng
        .try_fill_bytes(&mut entropy)
        .map_err(|e| BlockWalletError::entropy(format!("OS RNG failed: {}", e)))?;

    Mnemonic::from_entropy_in(Language::English, &entropy)
        .map_err(|e| BlockWalletError::entropy(format!("Failed to encode mnemonic: {}", e)))
}

pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic> {
    let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
    Mnemonic::parse_in(Language::English, &normalized)
        .map_err(|e| BlockWalletError::mnemonic(e.to_string()))
}

/// PBKDF2-HMAC-SHA512 over the phrase, salt `"mnemonic" + passphrase`.
pub fn mnemonic_to_seed(mnemonic: &Mnemonic, passphrase: &str) -> Seed {
    Seed(Zeroizing::new(mnemonic.to_seed(passphrase)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_word_counts() {
        let twelve = generate_mnemonic(WordCount::Twelve).unwrap();
        assert_eq!(twelve.word_count(), 12);

        let twenty_four = generate_mnemonic(WordCount::TwentyFour).unwrap();
        assert_eq!(twenty_four.word_count(), 24);
    }

    #[test]
    fn test_generated_mnemonics_differ() {
        let a = generate_mnemonic(WordCount::Twelve).unwrap();
        let b = generate_mnemonic(WordCount::Twelve).unwrap();
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_parse_normalizes_whitespace() {
        let messy = format!("  {}  ", ABANDON_ABOUT.replace(' ', "   "));
        let mnemonic = parse_mnemonic(&messy).unwrap();
        assert_eq!(mnemonic.to_string(), ABANDON_ABOUT);
    }

    #[test]
    fn test_parse_rejects_bad_checksum() {
        let bad = ABANDON_ABOUT.replace("about", "abandon");
        let err = parse_mnemonic(&bad).unwrap_err();
        assert!(matches!(err, BlockWalletError::InvalidMnemonic(_)));
        assert!(parse_mnemonic("not a mnemonic").is_err());
    }

    #[test]
    fn test_seed_trezor_vector() {
        let mnemonic = parse_mnemonic(ABANDON_ABOUT).unwrap();
        let seed = mnemonic_to_seed(&mnemonic, "TREZOR");
        assert_eq!(
            hex::encode(seed.as_bytes()),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_seed_is_deterministic() {
        for words in [WordCount::Twelve, WordCount::TwentyFour] {
            let mnemonic = generate_mnemonic(words).unwrap();
            let a = mnemonic_to_seed(&mnemonic, "");
            let b = mnemonic_to_seed(&mnemonic, "");
            assert_eq!(a.as_bytes(), b.as_bytes());

            let salted = mnemonic_to_seed(&mnemonic, "extra");
            assert_ne!(a.as_bytes(), salted.as_bytes());
        }
    }

    #[test]
    fn test_seed_debug_is_redacted() {
        let mnemonic = parse_mnemonic(ABANDON_ABOUT).unwrap();
        let seed = mnemonic_to_seed(&mnemonic, "");
        assert_eq!(format!("{:?}", seed), "Seed(<redacted>)");
    }
}
