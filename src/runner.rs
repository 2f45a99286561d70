//! Run driver
//!
//! Iterates accounts, then routes, then repeat count, running one swap
//! attempt at a time. Attempts never overlap: each one finishes (including
//! any confirmation wait) before the throttle delay starts, and the delay
//! finishes before the next attempt starts. The delay also follows the very
//! last attempt of the run.

use crate::chain::ChainClient;
use crate::config::{Config, Route, SwapSettings};
use crate::swap::{RunSummary, SwapOrchestrator};
use crate::Result;
use alloy::primitives::Address;
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Wall-clock pause between attempts
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self, delay: Duration);
}

/// Throttle backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioThrottle;

#[async_trait]
impl Throttle for TokioThrottle {
    async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Drives the account x route x repeat loop
pub struct SwapRunner<'a, T = TokioThrottle> {
    routes: &'a [Route],
    settings: &'a SwapSettings,
    orchestrator: SwapOrchestrator<'a>,
    throttle: T,
}

impl<'a> SwapRunner<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self::from_parts(config.router, &config.routes, &config.swap)
    }

    pub fn from_parts(router: Address, routes: &'a [Route], settings: &'a SwapSettings) -> Self {
        Self {
            routes,
            settings,
            orchestrator: SwapOrchestrator::new(router, settings),
            throttle: TokioThrottle,
        }
    }
}

impl<'a, T: Throttle> SwapRunner<'a, T> {
    /// Replace the throttle used between attempts
    pub fn with_throttle<U: Throttle>(self, throttle: U) -> SwapRunner<'a, U> {
        SwapRunner {
            routes: self.routes,
            settings: self.settings,
            orchestrator: self.orchestrator,
            throttle,
        }
    }

    /// Run every configured attempt for every account, in order.
    ///
    /// Each client is bound to one account. Attempt-level failures are
    /// counted in the summary; only setup failures (unreadable decimals or
    /// balances, unrepresentable amounts) abort the run.
    pub async fn run<C: ChainClient>(&self, clients: &[C]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let repeat_count = self.settings.repeat_count;
        let delay = self.settings.delay();

        for client in clients {
            let account = client.signer();
            info!(account = %account, "Processing account");

            for route in self.routes {
                for iteration in 0..repeat_count {
                    info!(
                        account = %account,
                        route = %route,
                        attempt = iteration + 1,
                        of = repeat_count,
                        "Starting swap"
                    );
                    let outcome = self.orchestrator.execute_attempt(client, route).await?;
                    summary.record(&outcome);

                    self.throttle.pause(delay).await;
                }
            }
        }

        info!(
            attempts = summary.attempts,
            confirmed = summary.confirmed,
            failed = summary.failed,
            submission_errors = summary.submission_errors,
            skipped = summary.skipped,
            "Run complete"
        );

        Ok(summary)
    }
}
