// Command-line binary for zecx

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use zecx::{
    cache::FetchCache,
    classify::{classify, search_target},
    config::{self, Command, Config},
    json_pretty, render,
    resolve::Resolver,
    rpc::HttpTransport,
};

// Raw JSON output cap; transaction-heavy blocks can run to megabytes.
const RAW_JSON_MAX_BYTES: usize = 100 * 1024;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    let _ = dotenvy::dotenv();
    env_logger::init();

    let (cfg, command) = config::load().context("Failed to load configuration")?;

    let transport = Arc::new(HttpTransport::new(
        cfg.rpc_url.clone(),
        cfg.rpc_timeout_ms,
        cfg.rpc_auth_token.clone(),
    ));
    let resolver = Resolver::new(transport, Arc::new(FetchCache::new()));

    match command {
        Command::Status { raw, watch } => {
            if watch {
                watch_status(&cfg, &resolver, raw).await
            } else {
                show_status(&resolver, raw).await
            }
        }
        Command::Block { identifier, raw } => show_block(&resolver, &identifier, raw).await,
        Command::Search { query, raw } => match search_target(&query) {
            Some(identifier) => show_block(&resolver, &identifier, raw).await,
            None => {
                // Neither a height nor a hash: silent no-op by contract.
                log::debug!("search query {query:?} is neither a height nor a hash");
                Ok(())
            }
        },
    }
}

async fn show_status(resolver: &Resolver, raw: bool) -> Result<()> {
    let envelope = resolver.chain_info().await?;
    if raw {
        println!(
            "{}",
            json_pretty::pretty_safe(&serde_json::to_value(&envelope)?, RAW_JSON_MAX_BYTES)
        );
    } else {
        print!("{}", render::render_chain_status(&envelope));
    }
    Ok(())
}

/// Non-overlapping poll loop: invalidate, refetch, render, sleep.
async fn watch_status(cfg: &Config, resolver: &Resolver, raw: bool) -> Result<()> {
    log::info!(
        "watching chain status - endpoint: {}, interval: {}ms",
        cfg.rpc_url,
        cfg.poll_interval_ms
    );

    loop {
        resolver.invalidate_chain_info();
        match resolver.chain_info().await {
            Ok(envelope) => {
                if raw {
                    println!(
                        "{}",
                        json_pretty::pretty_safe(
                            &serde_json::to_value(&envelope)?,
                            RAW_JSON_MAX_BYTES
                        )
                    );
                } else {
                    print!("{}", render::render_chain_status(&envelope));
                }
            }
            Err(e) => {
                log::error!("chain status fetch failed: {e}");
            }
        }

        tokio::time::sleep(Duration::from_millis(cfg.poll_interval_ms)).await;
    }
}

async fn show_block(resolver: &Resolver, identifier: &str, raw: bool) -> Result<()> {
    let class = classify(identifier);
    log::debug!("block identifier {identifier:?} classified as {class:?}");

    // The identifier goes to the node unchanged; classification is display
    // framing only.
    let envelope = resolver.block(identifier).await?;
    if raw {
        println!(
            "{}",
            json_pretty::pretty_safe(&serde_json::to_value(&envelope)?, RAW_JSON_MAX_BYTES)
        );
    } else {
        print!("{}", render::render_block(identifier, &class, &envelope));
    }
    Ok(())
}
