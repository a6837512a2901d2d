//! BIP-32 secp256k1 derivation and Ethereum addresses.

use crate::error::{BlockWalletError, Result};
use crate::wallet::DerivationPath;
use bitcoin::bip32::{DerivationPath as Bip32Path, Xpriv};
use bitcoin::secp256k1::{Secp256k1, SecretKey};
use bitcoin::Network;
use std::str::FromStr;
use tiny_keccak::{Hasher, Keccak};
use zeroize::Zeroizing;

pub fn derive_private_key(seed: &[u8], path: &DerivationPath) -> Result<Zeroizing<[u8; 32]>> {
    let secp = Secp256k1::new();

    // The network only affects xprv serialization, never the key material.
    let master_key = Xpriv::new_master(Network::Bitcoin, seed)
        .map_err(|e| BlockWalletError::derivation(format!("Failed to derive master key: {}", e)))?;

    let bip32_path = Bip32Path::from_str(&path.to_string())
        .map_err(|e| BlockWalletError::derivation(format!("Invalid derivation path: {}", e)))?;

    let child_key = master_key
        .derive_priv(&secp, &bip32_path)
        .map_err(|e| BlockWalletError::derivation(format!("Failed to derive child key: {}", e)))?;

    Ok(Zeroizing::new(child_key.private_key.secret_bytes()))
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut hash = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut hash);
    hash
}

/// EIP-55 checksummed address of the given private key.
///
/// Fails if the bytes are zero or not below the curve order.
pub fn ethereum_address(secret: &[u8; 32]) -> Result<String> {
    let secp = Secp256k1::new();
    let secret_key = SecretKey::from_slice(secret)
        .map_err(|e| BlockWalletError::derivation(format!("Invalid secp256k1 key: {}", e)))?;

    let public_key = secret_key.public_key(&secp).serialize_uncompressed();
    // drop the 0x04 prefix, keep the last 20 bytes of the hash
    let hash = keccak256(&public_key[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Ok(to_checksum_address(&address))
}

pub fn to_checksum_address(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }
    checksummed
}
