//! Attempt outcomes and the per-run tally

use crate::Error;
use alloy::primitives::{TxHash, U256};

/// Why an attempt ended without sending a swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    InsufficientBalance { balance: U256, required: U256 },
    DryRun,
}

/// Terminal state of a single swap attempt
#[derive(Debug)]
pub enum SwapOutcome {
    /// Nothing was sent
    Skipped(SkipReason),
    /// The swap was mined successfully
    Confirmed { tx_hash: TxHash, block_number: u64 },
    /// The swap was broadcast but reverted or its receipt never arrived
    Failed { tx_hash: TxHash, error: Error },
    /// The swap was never broadcast (allowance check, approval or broadcast failed)
    SubmissionError { error: Error },
}

impl SwapOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SwapOutcome::Confirmed { .. })
    }
}

/// Counts of attempt outcomes over a whole run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub attempts: u64,
    pub confirmed: u64,
    pub failed: u64,
    pub submission_errors: u64,
    pub skipped: u64,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &SwapOutcome) {
        self.attempts += 1;
        match outcome {
            SwapOutcome::Skipped(_) => self.skipped += 1,
            SwapOutcome::Confirmed { .. } => self.confirmed += 1,
            SwapOutcome::Failed { .. } => self.failed += 1,
            SwapOutcome::SubmissionError { .. } => self.submission_errors += 1,
        }
    }
}
