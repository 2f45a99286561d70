//! On-chain access for a single signer
//!
//! [`ChainClient`] is the seam between the swap orchestrator and the chain.
//! Every method is one RPC round trip (or one wait for a receipt); callers
//! await each call before issuing the next, so one account never has more
//! than one transaction in flight.

pub mod contracts;
mod evm;
#[cfg(test)]
pub(crate) mod mock;

use crate::swap::SwapRequest;
use crate::Result;
use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

pub use evm::EvmChainClient;

/// Handle to a broadcast transaction that has not been awaited yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTx {
    pub hash: TxHash,
}

impl PendingTx {
    pub fn new(hash: TxHash) -> Self {
        Self { hash }
    }
}

/// A successfully mined transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub gas_used: u64,
}

/// Reads and writes against token and router contracts on behalf of one signer
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address that signs every transaction sent through this client
    fn signer(&self) -> Address;

    /// `token.decimals()`
    async fn decimals(&self, token: Address) -> Result<u8>;

    /// `token.balanceOf(owner)`
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256>;

    /// `token.allowance(owner, spender)`
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    /// Broadcast `token.approve(spender, amount)`
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<PendingTx>;

    /// Broadcast `router.swapExactTokensForTokens(..)` with a fixed gas limit
    async fn swap(&self, router: Address, request: &SwapRequest, gas_limit: u64)
        -> Result<PendingTx>;

    /// Block until the transaction is mined.
    ///
    /// Fails with `TransactionReverted` when the receipt reports failure and
    /// with `Rpc` when the node errors or the wait times out.
    async fn await_confirmation(&self, pending: PendingTx) -> Result<Receipt>;
}
