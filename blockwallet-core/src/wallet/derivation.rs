use crate::error::{BlockWalletError, Result};
use crate::types::Chain;
use crate::wallet::{ed25519, secp256k1, Seed};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

const PURPOSE: u32 = 44;
const HARDENED_LIMIT: u32 = 1 << 31;

/// `m/44'/<coin type>'/<account>'/0'`, every level hardened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    chain: Chain,
    account_index: u32,
}

impl DerivationPath {
    pub fn new(chain: Chain, account_index: u32) -> Result<Self> {
        if account_index >= HARDENED_LIMIT {
            return Err(BlockWalletError::derivation(format!(
                "Account index {} is outside the hardened range",
                account_index
            )));
        }
        Ok(Self {
            chain,
            account_index,
        })
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn account_index(&self) -> u32 {
        self.account_index
    }

    /// Raw indices as fed to the HMAC step, hardened bit not yet applied.
    pub fn indices(&self) -> [u32; 4] {
        [PURPOSE, self.chain.coin_type(), self.account_index, 0]
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m/{}'/{}'/{}'/0'",
            PURPOSE,
            self.chain.coin_type(),
            self.account_index
        )
    }
}

impl FromStr for DerivationPath {
    type Err = BlockWalletError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || BlockWalletError::derivation(format!("Malformed derivation path: {}", s));

        let rest = s.trim().strip_prefix("m/").ok_or_else(malformed)?;
        let segments = rest
            .split('/')
            .map(|segment| {
                segment
                    .strip_suffix('\'')
                    .or_else(|| segment.strip_suffix('h'))
                    .ok_or_else(malformed)?
                    .parse::<u32>()
                    .map_err(|_| malformed())
            })
            .collect::<Result<Vec<u32>>>()?;

        match segments.as_slice() {
            [PURPOSE, coin_type, account_index, 0] => {
                DerivationPath::new(Chain::try_from(*coin_type)?, *account_index)
            }
            _ => Err(malformed()),
        }
    }
}

/// A freshly derived keypair.
///
/// The private half exists only so the address can be computed and checked;
/// it is wiped on drop and never printed.
pub struct Keypair {
    path: DerivationPath,
    address: String,
    secret: Zeroizing<[u8; 32]>,
}

impl Keypair {
    pub(crate) fn new(path: DerivationPath, address: String, secret: Zeroizing<[u8; 32]>) -> Self {
        Self {
            path,
            address,
            secret,
        }
    }

    pub fn chain(&self) -> Chain {
        self.path.chain()
    }

    pub fn path(&self) -> &DerivationPath {
        &self.path
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn secret_bytes(&self) -> &[u8; 32] {
        &self.secret
    }

    /// Drops the private material, keeping only the public address.
    pub fn into_address(self) -> String {
        self.address
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("path", &self.path.to_string())
            .field("address", &self.address)
            .field("secret", &"<redacted>")
            .finish()
    }
}

pub fn derive_keypair(seed: &Seed, chain: Chain, account_index: u32) -> Result<Keypair> {
    let path = DerivationPath::new(chain, account_index)?;

    let (secret, address) = match chain {
        Chain::Solana => {
            let secret = ed25519::derive_private_key(seed.as_bytes(), &path)?;
            let address = ed25519::solana_address(&secret);
            (secret, address)
        }
        Chain::Ethereum => {
            let secret = secp256k1::derive_private_key(seed.as_bytes(), &path)?;
            let address = secp256k1::ethereum_address(&secret)?;
            (secret, address)
        }
    };

    tracing::debug!("Derived {} address at {}", chain, path);
    Ok(Keypair::new(path, address, secret))
}
