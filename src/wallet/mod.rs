//! Secure wallet management
//!
//! This module handles private key parsing and signer construction.
//! Private keys never leave this module.

mod accounts;
mod signer;

pub use accounts::AccountSet;
pub use signer::SecureWallet;
