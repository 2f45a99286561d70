//! Account set
//!
//! Turns the configured secrets into independent signing identities, in
//! configured order. Each account signs and sequences nonces on its own;
//! nothing mutable is shared between accounts.

use super::SecureWallet;
use crate::Result;
use alloy::primitives::Address;
use secrecy::SecretString;

/// An ordered set of signing identities
#[derive(Debug, Clone)]
pub struct AccountSet {
    wallets: Vec<SecureWallet>,
}

impl AccountSet {
    /// Derive one wallet per secret. Any invalid secret fails the whole set.
    pub fn from_secrets(secrets: &[SecretString]) -> Result<Self> {
        let wallets = secrets
            .iter()
            .map(SecureWallet::from_secret)
            .collect::<Result<Vec<_>>>()?;

        for (index, wallet) in wallets.iter().enumerate() {
            tracing::debug!(index, address = %wallet.address(), "Loaded account");
        }

        Ok(Self { wallets })
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.wallets.iter().map(SecureWallet::address).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SecureWallet> {
        self.wallets.iter()
    }
}
