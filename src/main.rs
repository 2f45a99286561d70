//! Route Swapper CLI
//!
//! ```bash
//! route-swapper [AMOUNT] [COUNT] [DELAY_MS]
//! ```

use clap::Parser;
use route_swapper::chain::EvmChainClient;
use route_swapper::wallet::AccountSet;
use route_swapper::{Config, Result, SwapRunner, SwapSettings};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "route-swapper")]
#[command(about = "Repeated token swaps across wallets and routes")]
struct Cli {
    /// Amount of the input token to swap per attempt, in token units [default: 0.003]
    amount: Option<String>,

    /// Swap attempts per (wallet, route) [default: 2]
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    count: Option<u32>,

    /// Delay after every attempt, in milliseconds [default: 3000]
    delay_ms: Option<u64>,

    /// Path to a JSON file with swap tunables (gas_limit, deadline_secs, ...)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Check balances and allowances without sending transactions
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Swap settings from the config file (or defaults), with any positional
    /// arguments given on the command line taking precedence.
    fn swap_settings(&self) -> Result<SwapSettings> {
        let mut settings = match &self.config {
            Some(path) => SwapSettings::from_file(path)?,
            None => SwapSettings::default(),
        };
        if let Some(amount) = &self.amount {
            settings.amount = amount.clone();
        }
        if let Some(count) = self.count {
            settings.repeat_count = count;
        }
        if let Some(delay_ms) = self.delay_ms {
            settings.delay_ms = delay_ms;
        }
        settings.dry_run |= self.dry_run;
        Ok(settings)
    }
}

// Single-threaded on purpose: attempts and their transactions are strictly ordered.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    let (plain, json) = if cli.json {
        (None, Some(fmt::layer().json()))
    } else {
        (Some(fmt::layer()), None)
    };
    tracing_subscriber::registry()
        .with(plain)
        .with(json)
        .with(filter)
        .init();

    let config = Config::from_env(cli.swap_settings()?)?;

    tracing::info!(
        amount = %config.swap.amount,
        count = config.swap.repeat_count,
        delay_ms = config.swap.delay_ms,
        routes = config.routes.len(),
        dry_run = config.swap.dry_run,
        "Starting swap run"
    );

    let accounts = AccountSet::from_secrets(&config.private_keys)?;
    tracing::info!(accounts = accounts.len(), addresses = ?accounts.addresses(), "Loaded accounts");

    let clients = EvmChainClient::connect_all(&config, &accounts);
    SwapRunner::new(&config).run(&clients).await?;

    Ok(())
}
