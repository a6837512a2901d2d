//! SLIP-0010 ed25519 derivation and Solana addresses.
//!
//! SLIP-0010 only defines hardened children for ed25519, which is why the
//! wallet path hardens every level including the trailing `0'`.

use crate::error::{BlockWalletError, Result};
use crate::wallet::DerivationPath;
use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

const MASTER_SECRET: &[u8] = b"ed25519 seed";
const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Private key and chain code of one node in the tree.
struct ExtendedKey {
    key: Zeroizing<[u8; 32]>,
    chain_code: Zeroizing<[u8; 32]>,
}

impl ExtendedKey {
    fn from_hmac(mac: HmacSha512) -> Self {
        let mut output = [0u8; 64];
        output.copy_from_slice(&mac.finalize().into_bytes());

        let mut key = Zeroizing::new([0u8; 32]);
        let mut chain_code = Zeroizing::new([0u8; 32]);
        key.copy_from_slice(&output[..32]);
        chain_code.copy_from_slice(&output[32..]);
        output.zeroize();

        Self { key, chain_code }
    }

    fn master(seed: &[u8]) -> Result<Self> {
        let mut mac = new_mac(MASTER_SECRET)?;
        mac.update(seed);
        Ok(Self::from_hmac(mac))
    }

    fn child(&self, index: u32) -> Result<Self> {
        let mut mac = new_mac(&self.chain_code[..])?;
        mac.update(&[0x00]);
        mac.update(&self.key[..]);
        mac.update(&(index | HARDENED_OFFSET).to_be_bytes());
        Ok(Self::from_hmac(mac))
    }
}

fn new_mac(key: &[u8]) -> Result<HmacSha512> {
    HmacSha512::new_from_slice(key)
        .map_err(|e| BlockWalletError::derivation(format!("HMAC init failed: {}", e)))
}

/// Walks `indices` from the master node, hardening each one.
pub fn derive_from_indices(seed: &[u8], indices: &[u32]) -> Result<Zeroizing<[u8; 32]>> {
    let mut node = ExtendedKey::master(seed)?;
    for index in indices {
        if *index >= HARDENED_OFFSET {
            return Err(BlockWalletError::derivation(format!(
                "Index {} is outside the hardened range",
                index
            )));
        }
        node = node.child(*index)?;
    }
    Ok(node.key)
}

pub fn derive_private_key(seed: &[u8], path: &DerivationPath) -> Result<Zeroizing<[u8; 32]>> {
    derive_from_indices(seed, &path.indices())
}

/// Base58 of the ed25519 public key for the given 32-byte signing seed.
pub fn solana_address(secret: &[u8; 32]) -> String {
    let signing_key = SigningKey::from_bytes(secret);
    bs58::encode(signing_key.verifying_key().as_bytes()).into_string()
}
