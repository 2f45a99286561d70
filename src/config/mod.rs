//! Configuration for the swap runner
//!
//! Connection details and secrets come from the environment (a `.env` file is
//! loaded first if present). Swap tunables have defaults, can be overridden
//! from a JSON file, and the CLI sets amount, repeat count and delay.

pub mod routes;

use crate::units::validate_amount;
use crate::{Error, Result};
use alloy::primitives::Address;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub use routes::{parse_routes, Route};

/// Environment variable names
pub mod env_vars {
    pub const RPC_URL: &str = "RPC_URL";
    pub const PRIVATE_KEYS: &str = "PRIVATE_KEYS";
    pub const ROUTER_ADDRESS: &str = "ROUTER_ADDRESS";
    pub const ROUTES: &str = "ROUTES";
}

pub const DEFAULT_AMOUNT: &str = "0.003";
pub const DEFAULT_REPEAT_COUNT: u32 = 2;
pub const DEFAULT_DELAY_MS: u64 = 3_000;
/// Gas ceiling attached to every swap transaction
pub const DEFAULT_GAS_LIMIT: u64 = 300_000;
/// Seconds after submission before the router rejects a swap
pub const DEFAULT_DEADLINE_SECS: u64 = 1_800;

/// Per-attempt swap parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapSettings {
    /// Amount to swap in human-readable units of the input token
    pub amount: String,
    /// Swap attempts per (account, route)
    pub repeat_count: u32,
    /// Delay applied after every attempt (milliseconds)
    pub delay_ms: u64,
    pub gas_limit: u64,
    pub deadline_secs: u64,
    /// Give up waiting for a receipt after this many seconds
    pub confirmation_timeout_secs: Option<u64>,
    /// Read-only mode: check balances and allowances but send nothing
    pub dry_run: bool,
}

impl Default for SwapSettings {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT.to_string(),
            repeat_count: DEFAULT_REPEAT_COUNT,
            delay_ms: DEFAULT_DELAY_MS,
            gas_limit: DEFAULT_GAS_LIMIT,
            deadline_secs: DEFAULT_DEADLINE_SECS,
            confirmation_timeout_secs: None,
            dry_run: false,
        }
    }
}

impl SwapSettings {
    /// Load tunables from a JSON file; missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount(&self.amount)?;
        if self.repeat_count == 0 {
            return Err(Error::Config("Repeat count must be at least 1".to_string()));
        }
        if self.gas_limit == 0 {
            return Err(Error::Config("Gas limit must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Main configuration, built once at startup and passed by reference.
#[derive(Debug)]
pub struct Config {
    pub rpc_url: Url,
    /// Signing secrets, one per account, in configured order
    pub private_keys: Vec<SecretString>,
    pub router: Address,
    pub routes: Vec<Route>,
    pub swap: SwapSettings,
}

impl Config {
    /// Build the configuration from process environment variables
    pub fn from_env(swap: SwapSettings) -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok(), swap)
    }

    /// Build the configuration from any name -> value lookup
    pub fn from_lookup<F>(lookup: F, swap: SwapSettings) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("Environment variable {} not set", name)))
        };

        let rpc_url = Url::parse(required(env_vars::RPC_URL)?.trim())
            .map_err(|e| Error::Config(format!("Invalid RPC URL: {}", e)))?;

        let private_keys: Vec<SecretString> = required(env_vars::PRIVATE_KEYS)?
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| SecretString::from(key.to_string()))
            .collect();
        if private_keys.is_empty() {
            return Err(Error::Config(format!(
                "{} contains no keys",
                env_vars::PRIVATE_KEYS
            )));
        }

        let router_raw = required(env_vars::ROUTER_ADDRESS)?;
        let router = Address::from_str(router_raw.trim())
            .map_err(|e| Error::Config(format!("Invalid router address: {}", e)))?;

        let routes = parse_routes(&required(env_vars::ROUTES)?)?;

        swap.validate()?;

        tracing::debug!(
            rpc_host = rpc_url.host_str().unwrap_or_default(),
            accounts = private_keys.len(),
            routes = routes.len(),
            router = %router,
            "Loaded configuration"
        );

        Ok(Self {
            rpc_url,
            private_keys,
            router,
            routes,
            swap,
        })
    }
}
