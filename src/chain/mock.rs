//! In-memory chain client that records every call, for orchestrator and
//! runner tests.

use super::{ChainClient, PendingTx, Receipt};
use crate::swap::SwapRequest;
use crate::{Error, Result};
use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One observable interaction, in the order it happened
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Decimals(Address),
    Balance { token: Address, owner: Address },
    Allowance { token: Address, owner: Address, spender: Address },
    Approve { token: Address, spender: Address, amount: U256 },
    Swap { router: Address, request: SwapRequest, gas_limit: u64 },
    Confirm(TxHash),
    Delay(Duration),
}

impl Call {
    pub fn is_write(&self) -> bool {
        matches!(self, Call::Approve { .. } | Call::Swap { .. })
    }
}

/// Shared, ordered call log
pub type CallLog = Arc<Mutex<Vec<Call>>>;

#[derive(Debug)]
enum PendingEffect {
    Approval { token: Address, amount: U256 },
    Swap { index: usize },
}

#[derive(Debug, Default)]
struct State {
    next_hash: u64,
    swaps_sent: usize,
    allowances: HashMap<Address, U256>,
    pending: HashMap<TxHash, PendingEffect>,
}

pub struct MockChainClient {
    signer: Address,
    log: CallLog,
    decimals: HashMap<Address, u8>,
    balances: HashMap<Address, U256>,
    fail_decimals: bool,
    fail_balance: bool,
    fail_allowance: bool,
    fail_approve: bool,
    /// Approvals are mined but revert
    revert_approve: bool,
    /// Zero-based swap indices whose broadcast fails
    reject_swaps: HashSet<usize>,
    /// Zero-based swap indices that are mined but revert
    revert_swaps: HashSet<usize>,
    state: Mutex<State>,
}

impl MockChainClient {
    pub fn new(signer: Address, log: CallLog) -> Self {
        Self {
            signer,
            log,
            decimals: HashMap::new(),
            balances: HashMap::new(),
            fail_decimals: false,
            fail_balance: false,
            fail_allowance: false,
            fail_approve: false,
            revert_approve: false,
            reject_swaps: HashSet::new(),
            revert_swaps: HashSet::new(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn with_token(mut self, token: Address, decimals: u8, balance: U256) -> Self {
        self.decimals.insert(token, decimals);
        self.balances.insert(token, balance);
        self
    }

    pub fn with_allowance(self, token: Address, allowance: U256) -> Self {
        self.state
            .lock()
            .unwrap()
            .allowances
            .insert(token, allowance);
        self
    }

    pub fn failing_decimals(mut self) -> Self {
        self.fail_decimals = true;
        self
    }

    pub fn failing_balance(mut self) -> Self {
        self.fail_balance = true;
        self
    }

    pub fn failing_allowance(mut self) -> Self {
        self.fail_allowance = true;
        self
    }

    pub fn failing_approve(mut self) -> Self {
        self.fail_approve = true;
        self
    }

    pub fn reverting_approve(mut self) -> Self {
        self.revert_approve = true;
        self
    }

    pub fn rejecting_swap(mut self, index: usize) -> Self {
        self.reject_swaps.insert(index);
        self
    }

    pub fn reverting_swap(mut self, index: usize) -> Self {
        self.revert_swaps.insert(index);
        self
    }

    fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
    }

    fn issue(&self, effect: PendingEffect) -> PendingTx {
        let mut state = self.state.lock().unwrap();
        state.next_hash += 1;
        let hash = TxHash::left_padding_from(&state.next_hash.to_be_bytes());
        state.pending.insert(hash, effect);
        PendingTx::new(hash)
    }
}

/// Recording throttle sharing the client's call log
pub struct RecordingThrottle {
    pub log: CallLog,
}

#[async_trait]
impl crate::runner::Throttle for RecordingThrottle {
    async fn pause(&self, delay: Duration) {
        self.log.lock().unwrap().push(Call::Delay(delay));
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    fn signer(&self) -> Address {
        self.signer
    }

    async fn decimals(&self, token: Address) -> Result<u8> {
        self.record(Call::Decimals(token));
        if self.fail_decimals {
            return Err(Error::Rpc("connection refused".to_string()));
        }
        self.decimals
            .get(&token)
            .copied()
            .ok_or_else(|| Error::Rpc(format!("execution reverted: no token at {}", token)))
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        self.record(Call::Balance { token, owner });
        if self.fail_balance {
            return Err(Error::Rpc("request timed out".to_string()));
        }
        Ok(self.balances.get(&token).copied().unwrap_or_default())
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        self.record(Call::Allowance {
            token,
            owner,
            spender,
        });
        if self.fail_allowance {
            return Err(Error::Rpc("header not found".to_string()));
        }
        let state = self.state.lock().unwrap();
        Ok(state.allowances.get(&token).copied().unwrap_or_default())
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<PendingTx> {
        self.record(Call::Approve {
            token,
            spender,
            amount,
        });
        if self.fail_approve {
            return Err(Error::Submission("nonce too low".to_string()));
        }
        Ok(self.issue(PendingEffect::Approval { token, amount }))
    }

    async fn swap(
        &self,
        router: Address,
        request: &SwapRequest,
        gas_limit: u64,
    ) -> Result<PendingTx> {
        self.record(Call::Swap {
            router,
            request: request.clone(),
            gas_limit,
        });
        let index = {
            let mut state = self.state.lock().unwrap();
            state.swaps_sent += 1;
            state.swaps_sent - 1
        };
        if self.reject_swaps.contains(&index) {
            return Err(Error::Submission("insufficient funds for gas".to_string()));
        }
        Ok(self.issue(PendingEffect::Swap { index }))
    }

    async fn await_confirmation(&self, pending: PendingTx) -> Result<Receipt> {
        self.record(Call::Confirm(pending.hash));
        let mut state = self.state.lock().unwrap();
        let effect = state
            .pending
            .remove(&pending.hash)
            .ok_or_else(|| Error::Rpc(format!("transaction {} dropped", pending.hash)))?;

        match effect {
            PendingEffect::Approval { .. } if self.revert_approve => {
                return Err(Error::TransactionReverted(pending.hash));
            }
            PendingEffect::Approval { token, amount } => {
                state.allowances.insert(token, amount);
            }
            PendingEffect::Swap { index } if self.revert_swaps.contains(&index) => {
                return Err(Error::TransactionReverted(pending.hash));
            }
            PendingEffect::Swap { .. } => {}
        }

        Ok(Receipt {
            tx_hash: pending.hash,
            block_number: 100 + state.next_hash,
            gas_used: 21_000,
        })
    }
}
