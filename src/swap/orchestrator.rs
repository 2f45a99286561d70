//! Single swap attempt
//!
//! One attempt walks a fixed sequence of states and never revisits one:
//!
//! ```text
//! Start -> DecimalsResolved -> BalanceChecked -+-> Skipped
//!                                              +-> AllowanceChecked
//!                        [-> ApprovalPending -> Approved]
//!                             -> SwapSubmitted -> Confirmed | Failed
//! ```
//!
//! Read failures before the allowance check propagate to the caller: they
//! mean the setup is broken. Everything from the allowance check onwards is
//! folded into the returned [`SwapOutcome`] so the run can continue.

use super::{SkipReason, SwapOutcome, SwapRequest};
use crate::chain::ChainClient;
use crate::config::{Route, SwapSettings};
use crate::units::{format_units, parse_units};
use crate::Result;
use alloy::primitives::{Address, U256};
use tracing::{debug, error, info, warn};

/// Runs the balance -> allowance -> swap -> confirm protocol
#[derive(Debug, Clone, Copy)]
pub struct SwapOrchestrator<'a> {
    router: Address,
    settings: &'a SwapSettings,
}

impl<'a> SwapOrchestrator<'a> {
    pub fn new(router: Address, settings: &'a SwapSettings) -> Self {
        Self { router, settings }
    }

    /// Perform one swap attempt for the client's signer along `route`.
    pub async fn execute_attempt<C>(&self, client: &C, route: &Route) -> Result<SwapOutcome>
    where
        C: ChainClient + ?Sized,
    {
        let account = client.signer();

        let decimals = client.decimals(route.token_in).await?;
        let amount_in = parse_units(&self.settings.amount, decimals)?;
        debug!(account = %account, decimals, amount_in = %amount_in, "Resolved swap amount");

        let balance = client.balance_of(route.token_in, account).await?;
        if balance < amount_in {
            warn!(
                account = %account,
                balance = %format_units(balance, decimals),
                required = %self.settings.amount,
                "Insufficient balance, skipping swap"
            );
            return Ok(SwapOutcome::Skipped(SkipReason::InsufficientBalance {
                balance,
                required: amount_in,
            }));
        }

        if let Err(error) = self.ensure_allowance(client, account, route, amount_in).await {
            error!(account = %account, error = %error, "Approval failed");
            return Ok(SwapOutcome::SubmissionError { error });
        }

        if self.settings.dry_run {
            info!(
                account = %account,
                route = %route,
                amount = %self.settings.amount,
                "Dry run: swap not sent"
            );
            return Ok(SwapOutcome::Skipped(SkipReason::DryRun));
        }

        Ok(self.submit_swap(client, account, route, amount_in).await)
    }

    /// Approve the router for the maximum amount when the current allowance
    /// is short, and wait for the approval to be mined.
    async fn ensure_allowance<C>(
        &self,
        client: &C,
        account: Address,
        route: &Route,
        amount_in: U256,
    ) -> Result<()>
    where
        C: ChainClient + ?Sized,
    {
        let allowance = client
            .allowance(route.token_in, account, self.router)
            .await?;
        if allowance >= amount_in {
            debug!(account = %account, allowance = %allowance, "Allowance sufficient");
            return Ok(());
        }

        if self.settings.dry_run {
            info!(account = %account, token = %route.token_in, "Dry run: approval required");
            return Ok(());
        }

        info!(account = %account, token = %route.token_in, "Approving token");
        let pending = client
            .approve(route.token_in, self.router, U256::MAX)
            .await?;
        let receipt = client.await_confirmation(pending).await?;
        info!(
            account = %account,
            tx_hash = %receipt.tx_hash,
            block = receipt.block_number,
            "Token approved"
        );
        Ok(())
    }

    async fn submit_swap<C>(
        &self,
        client: &C,
        account: Address,
        route: &Route,
        amount_in: U256,
    ) -> SwapOutcome
    where
        C: ChainClient + ?Sized,
    {
        let request = SwapRequest::new(amount_in, route, account, self.settings.deadline_secs);

        let pending = match client
            .swap(self.router, &request, self.settings.gas_limit)
            .await
        {
            Ok(pending) => pending,
            Err(error) => {
                error!(account = %account, error = %error, "Swap submission failed");
                return SwapOutcome::SubmissionError { error };
            }
        };
        info!(
            account = %account,
            amount = %self.settings.amount,
            tx_hash = %pending.hash,
            "Swap sent"
        );

        match client.await_confirmation(pending).await {
            Ok(receipt) => {
                info!(
                    account = %account,
                    tx_hash = %receipt.tx_hash,
                    block = receipt.block_number,
                    gas_used = receipt.gas_used,
                    "Swap confirmed"
                );
                SwapOutcome::Confirmed {
                    tx_hash: receipt.tx_hash,
                    block_number: receipt.block_number,
                }
            }
            Err(error) => {
                error!(
                    account = %account,
                    tx_hash = %pending.hash,
                    error = %error,
                    "Swap failed"
                );
                SwapOutcome::Failed {
                    tx_hash: pending.hash,
                    error,
                }
            }
        }
    }
}
