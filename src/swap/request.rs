//! Swap request value object

use crate::config::Route;
use alloy::primitives::{Address, U256};
use chrono::Utc;

/// Arguments of one `swapExactTokensForTokens` call.
///
/// Built fresh for every attempt; the deadline is never carried over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub amount_in: U256,
    /// Always zero: no slippage protection, any output amount is accepted
    pub min_amount_out: U256,
    pub path: Vec<Address>,
    pub recipient: Address,
    /// Unix timestamp (seconds) after which the router rejects the swap
    pub deadline: u64,
}

impl SwapRequest {
    /// Build a request whose deadline is `deadline_secs` from now
    pub fn new(amount_in: U256, route: &Route, recipient: Address, deadline_secs: u64) -> Self {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        Self::at(now, amount_in, route, recipient, deadline_secs)
    }

    /// Build a request as if submitted at `now` (unix seconds)
    pub fn at(
        now: u64,
        amount_in: U256,
        route: &Route,
        recipient: Address,
        deadline_secs: u64,
    ) -> Self {
        Self {
            amount_in,
            min_amount_out: U256::ZERO,
            path: route.path(),
            recipient,
            deadline: now.saturating_add(deadline_secs),
        }
    }
}
