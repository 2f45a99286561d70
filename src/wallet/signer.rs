//! Secure wallet implementation
//!
//! SECURITY: This is the ONLY place where private keys are turned into signers.
//! - Keys arrive wrapped in `SecretString` and are exposed only for parsing
//! - Keys are held in alloy's PrivateKeySigner afterwards
//! - Keys are never serialized and never logged

use crate::{Error, Result};
use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use secrecy::{ExposeSecret, SecretString};

/// Signing identity for one account
#[derive(Clone)]
pub struct SecureWallet {
    /// Public address (safe to expose)
    address: Address,
    /// Ethereum wallet for alloy providers
    wallet: EthereumWallet,
}

impl SecureWallet {
    /// Create a wallet from a secret hex-encoded private key
    pub fn from_secret(key: &SecretString) -> Result<Self> {
        Self::from_hex(key.expose_secret())
    }

    /// Create a wallet from a hex-encoded private key
    pub fn from_hex(key_hex: &str) -> Result<Self> {
        let key_hex = key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        // The parse error is deliberately not echoed: it may quote key material.
        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|_| Error::Wallet("Invalid private key".to_string()))?;

        let address = signer.address();
        let wallet = EthereumWallet::from(signer);

        Ok(Self { address, wallet })
    }

    /// Get the public address (safe to share)
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get the EthereumWallet for use with alloy providers
    ///
    /// EthereumWallet only exposes signing operations, not the raw key.
    pub fn wallet(&self) -> &EthereumWallet {
        &self.wallet
    }
}

// Implement Debug manually to avoid exposing the signer
impl std::fmt::Debug for SecureWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureWallet")
            .field("address", &self.address)
            .field("signer", &"[REDACTED]")
            .finish()
    }
}
