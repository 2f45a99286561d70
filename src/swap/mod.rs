//! Swap execution: request construction, the single-attempt protocol and
//! attempt outcomes

mod orchestrator;
mod outcome;
mod request;

pub use orchestrator::SwapOrchestrator;
pub use outcome::{RunSummary, SkipReason, SwapOutcome};
pub use request::SwapRequest;
