//! alloy-backed chain client
//!
//! One HTTP provider per signer. The provider's recommended fillers handle
//! nonce, chain id and fee fields; the wallet filler signs.

use super::contracts::{IUniswapV2Router, IERC20};
use super::{ChainClient, PendingTx, Receipt};
use crate::swap::SwapRequest;
use crate::wallet::{AccountSet, SecureWallet};
use crate::{Config, Error, Result};
use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Chain client bound to one wallet and one RPC endpoint
pub struct EvmChainClient {
    provider: DynProvider,
    signer: Address,
    confirmation_timeout: Option<Duration>,
}

impl EvmChainClient {
    /// Bind `wallet` to the RPC endpoint at `rpc_url`
    pub fn connect(
        rpc_url: &Url,
        wallet: &SecureWallet,
        confirmation_timeout: Option<Duration>,
    ) -> Self {
        let provider = ProviderBuilder::new()
            .wallet(wallet.wallet().clone())
            .connect_http(rpc_url.clone())
            .erased();

        Self {
            provider,
            signer: wallet.address(),
            confirmation_timeout,
        }
    }

    /// One client per account, all on the configured endpoint and receipt timeout
    pub fn connect_all(config: &Config, accounts: &AccountSet) -> Vec<Self> {
        let timeout = config.swap.confirmation_timeout();
        accounts
            .iter()
            .map(|wallet| Self::connect(&config.rpc_url, wallet, timeout))
            .collect()
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout
    }
}

impl std::fmt::Debug for EvmChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmChainClient")
            .field("signer", &self.signer)
            .field("confirmation_timeout", &self.confirmation_timeout)
            .finish()
    }
}

#[async_trait]
impl ChainClient for EvmChainClient {
    fn signer(&self) -> Address {
        self.signer
    }

    async fn decimals(&self, token: Address) -> Result<u8> {
        IERC20::new(token, self.provider.clone())
            .decimals()
            .call()
            .await
            .map_err(|e| Error::Rpc(format!("decimals() on {} failed: {}", token, e)))
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        IERC20::new(token, self.provider.clone())
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| Error::Rpc(format!("balanceOf({}) on {} failed: {}", owner, token, e)))
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        IERC20::new(token, self.provider.clone())
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| {
                Error::Rpc(format!(
                    "allowance({}, {}) on {} failed: {}",
                    owner, spender, token, e
                ))
            })
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<PendingTx> {
        let pending = IERC20::new(token, self.provider.clone())
            .approve(spender, amount)
            .send()
            .await
            .map_err(|e| Error::Submission(format!("approve on {} failed: {}", token, e)))?;

        Ok(PendingTx::new(*pending.tx_hash()))
    }

    async fn swap(
        &self,
        router: Address,
        request: &SwapRequest,
        gas_limit: u64,
    ) -> Result<PendingTx> {
        let pending = IUniswapV2Router::new(router, self.provider.clone())
            .swapExactTokensForTokens(
                request.amount_in,
                request.min_amount_out,
                request.path.clone(),
                request.recipient,
                U256::from(request.deadline),
            )
            .gas(gas_limit)
            .send()
            .await
            .map_err(|e| Error::Submission(format!("swap via {} failed: {}", router, e)))?;

        Ok(PendingTx::new(*pending.tx_hash()))
    }

    async fn await_confirmation(&self, pending: PendingTx) -> Result<Receipt> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), pending.hash)
            .with_timeout(self.confirmation_timeout)
            .get_receipt()
            .await
            .map_err(|e| {
                Error::Rpc(format!(
                    "waiting for receipt of {} failed: {}",
                    pending.hash, e
                ))
            })?;

        if !ReceiptResponse::status(&receipt) {
            return Err(Error::TransactionReverted(pending.hash));
        }

        let block_number = ReceiptResponse::block_number(&receipt)
            .ok_or_else(|| Error::Rpc(format!("receipt for {} has no block number", pending.hash)))?;

        Ok(Receipt {
            tx_hash: pending.hash,
            block_number,
            gas_used: ReceiptResponse::gas_used(&receipt),
        })
    }
}
