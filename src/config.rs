use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::env;

/// zecx - Zcash Blockchain Explorer
///
/// Command-line explorer for a Zcash node's JSON-RPC interface.
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug)]
#[command(name = "zecx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Zcash Blockchain Explorer", long_about = None)]
pub struct CliArgs {
    /// Blockchain RPC endpoint URL (node or backend proxy)
    #[arg(long, env = "ZCASH_RPC_URL")]
    pub rpc_url: Option<String>,

    /// RPC request timeout in milliseconds (1000-60000)
    #[arg(long, env = "RPC_TIMEOUT_MS")]
    pub rpc_timeout_ms: Option<u64>,

    /// Bearer token forwarded on every RPC request (proxy deployments)
    #[arg(long, env = "RPC_AUTH_TOKEN")]
    pub rpc_auth_token: Option<String>,

    /// Watch-mode refresh interval in milliseconds (100-600000)
    #[arg(long, env = "POLL_INTERVAL_MS")]
    pub poll_interval_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show current chain status (getblockchaininfo)
    Status {
        /// Print the raw JSON envelope instead of the formatted page
        #[arg(long)]
        raw: bool,
        /// Keep refreshing on an interval instead of exiting
        #[arg(long)]
        watch: bool,
    },
    /// Show a block by height or hash (getblock)
    Block {
        /// Block height or 64-hex-character block hash, sent verbatim
        identifier: String,
        /// Print the raw JSON envelope instead of the formatted page
        #[arg(long)]
        raw: bool,
    },
    /// Look up free text: navigates only when it is a height or a hash
    Search {
        query: String,
        /// Print the raw JSON envelope instead of the formatted page
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub rpc_url: String,
    pub rpc_timeout_ms: u64,
    pub rpc_auth_token: Option<String>,
    pub poll_interval_ms: u64,
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Validate URL format (basic check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

/// Load configuration from CLI args and environment variables
/// Priority: CLI args > Environment variables > Defaults
pub fn load() -> Result<(Config, Command)> {
    let args = CliArgs::parse();
    let config = resolve(&args)?;
    Ok((config, args.command))
}

fn resolve(args: &CliArgs) -> Result<Config> {
    let rpc_url = args
        .rpc_url
        .clone()
        .or_else(|| env::var("ZCASH_RPC_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:8232/".to_string());
    validate_url(&rpc_url, "ZCASH_RPC_URL")?;

    let rpc_timeout_ms = args
        .rpc_timeout_ms
        .or_else(|| env::var("RPC_TIMEOUT_MS").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(8000);
    let rpc_timeout_ms = validate_in_range(rpc_timeout_ms, 1000, 60000, "RPC_TIMEOUT_MS")?;

    let poll_interval_ms = args
        .poll_interval_ms
        .or_else(|| {
            env::var("POLL_INTERVAL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
        })
        .unwrap_or(15_000);
    let poll_interval_ms = validate_in_range(poll_interval_ms, 100, 600_000, "POLL_INTERVAL_MS")?;

    Ok(Config {
        rpc_url,
        rpc_timeout_ms,
        rpc_auth_token: args
            .rpc_auth_token
            .clone()
            .or_else(|| env::var("RPC_AUTH_TOKEN").ok()),
        poll_interval_ms,
    })
}

impl Config {
    /// Print current configuration (useful for debugging)
    #[allow(dead_code)]
    pub fn print_summary(&self) {
        eprintln!("zecx Configuration:");
        eprintln!("  RPC URL: {}", self.rpc_url);
        eprintln!("  RPC Timeout: {}ms", self.rpc_timeout_ms);
        eprintln!("  Poll Interval: {}ms", self.poll_interval_ms);
        if self.rpc_auth_token.is_some() {
            eprintln!("  RPC Auth: Configured");
        }
    }
}
