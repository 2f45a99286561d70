//! Route Swapper
//!
//! Repeatedly swaps tokens through a DEX router for a set of wallets and a
//! set of token routes:
//! - Checks the input-token balance and skips attempts that cannot be funded
//! - Approves the router once per (wallet, token), for the maximum amount
//! - Sends `swapExactTokensForTokens` with a fixed gas limit and waits for it
//!   to be mined
//!
//! # Execution model
//!
//! Strictly serial: one attempt at a time, one transaction in flight per
//! account, with a fixed delay between attempts. A failed swap is logged and
//! the run moves on; broken setup (unreadable token, bad config) stops it.
//!
//! # Slippage
//!
//! Swaps are sent with `amountOutMin = 0`. Any output amount is accepted.

pub mod chain;
pub mod config;
pub mod runner;
pub mod swap;
pub mod units;
pub mod wallet;

mod error;

// Re-export commonly used types
pub use config::{Config, Route, SwapSettings};
pub use error::{Error, Result};
pub use runner::SwapRunner;
pub use swap::{RunSummary, SwapOutcome};
