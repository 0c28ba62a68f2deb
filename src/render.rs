//! Plain-text rendering of the two explorer pages.
//!
//! Consumes the verbatim RPC envelope plus the raw identifier and its
//! classification; branching on `error` versus `result` happens here, not in
//! the resolution layer.

use crate::classify::Classification;
use crate::rpc::RpcEnvelope;
use crate::types::{BlockInfo, BlockchainInfo, ValuePool};
use crate::util_text::{
    format_bytes, format_number, format_percentage, format_timestamp, format_zec,
    format_zec_delta, truncate_hash,
};
use std::fmt::Write;

const PROGRESS_BAR_WIDTH: usize = 20;

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.len()));
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
}

fn field(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {label:<18}{value}");
}

fn error_banner(out: &mut String, envelope: &RpcEnvelope) -> bool {
    if let Some(err) = &envelope.error {
        let _ = writeln!(out);
        let _ = writeln!(out, "Error: {} (code {})", err.message, err.code);
        true
    } else {
        false
    }
}

fn progress_bar(fraction: f64) -> String {
    let clamped = fraction.clamp(0.0, 1.0);
    let filled = (clamped * PROGRESS_BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

fn value_pools(out: &mut String, pools: &[ValuePool], with_delta: bool) {
    if pools.is_empty() {
        return;
    }
    section(out, "Value Pools");
    for pool in pools {
        let monitored = if pool.monitored { "monitored" } else { "not monitored" };
        let mut line = format!("  {:<10}{:<22}{monitored}", pool.id, format_zec(pool.chain_value));
        if with_delta {
            if let Some(delta) = pool.value_delta {
                let _ = write!(line, "  {}", format_zec_delta(delta));
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

/// Render the chain-status page from a `getblockchaininfo` envelope.
pub fn render_chain_status(envelope: &RpcEnvelope) -> String {
    let mut out = String::new();
    heading(&mut out, "Zcash Blockchain Info");

    let had_error = error_banner(&mut out, envelope);
    let info: Option<BlockchainInfo> = envelope.decode();
    let info = match info {
        Some(info) => info,
        None => {
            if !had_error {
                let _ = writeln!(out, "\nNo data.");
            }
            return out;
        }
    };

    section(&mut out, "Network");
    field(&mut out, "Chain:", &info.chain);
    field(&mut out, "Pruned:", if info.pruned { "Yes" } else { "No" });

    section(&mut out, "Block Height");
    field(&mut out, "Blocks:", format_number(info.blocks));
    field(&mut out, "Headers:", format_number(info.headers));
    if let Some(estimated) = info.estimatedheight {
        field(&mut out, "Estimated Height:", format_number(estimated));
    }

    section(&mut out, "Sync Status");
    field(
        &mut out,
        "Progress:",
        format!(
            "{} {}",
            progress_bar(info.verificationprogress),
            format_percentage(info.verificationprogress)
        ),
    );

    section(&mut out, "Mining");
    field(
        &mut out,
        "Difficulty:",
        format_number(info.difficulty.round().max(0.0) as u64),
    );
    field(&mut out, "Size on Disk:", format_bytes(info.size_on_disk));

    section(&mut out, "Best Block Hash");
    let _ = writeln!(out, "  {}", info.bestblockhash);

    section(&mut out, "Chainwork");
    let _ = writeln!(out, "  {}", info.chainwork);

    value_pools(&mut out, &info.value_pools, false);

    if !info.consensus.chaintip.is_empty() || !info.consensus.nextblock.is_empty() {
        section(&mut out, "Consensus");
        field(&mut out, "Chain Tip:", &info.consensus.chaintip);
        field(&mut out, "Next Block:", &info.consensus.nextblock);
    }

    if !info.upgrades.is_empty() {
        section(&mut out, "Network Upgrades");
        let name_width = info
            .upgrades
            .values()
            .map(|u| u.name.len())
            .max()
            .unwrap_or(0)
            .max("Name".len())
            + 2;
        let _ = writeln!(
            out,
            "  {:<name_width$}{:<19}{}",
            "Name", "Activation Height", "Status"
        );
        for upgrade in info.upgrades.values() {
            let _ = writeln!(
                out,
                "  {:<name_width$}{:<19}{}",
                upgrade.name,
                format_number(upgrade.activationheight),
                upgrade.status
            );
        }
    }

    out
}

/// Heading framing for the block page: the resolved height when data is
/// present, otherwise the identifier shaped by its classification
/// (truncated hash vs. verbatim height).
fn block_heading(identifier: &str, class: &Classification, block: Option<&BlockInfo>) -> String {
    if let Some(block) = block {
        return format!("Block {}", format_number(block.height));
    }
    match class {
        Classification::Hash => format!("Block {}", truncate_hash(identifier)),
        Classification::Height(height) => format!("Block {}", format_number(*height)),
        Classification::Invalid => format!("Block {identifier}"),
    }
}

/// Render the block-detail page from a `getblock` envelope.
pub fn render_block(identifier: &str, class: &Classification, envelope: &RpcEnvelope) -> String {
    let mut out = String::new();
    let block: Option<BlockInfo> = envelope.decode();
    heading(&mut out, &block_heading(identifier, class, block.as_ref()));

    let had_error = error_banner(&mut out, envelope);
    let block = match block {
        Some(block) => block,
        None => {
            if !had_error {
                let _ = writeln!(out, "\nNo data.");
            }
            return out;
        }
    };

    // Navigation hints mirror prev/next availability, not height arithmetic
    // alone: the tip has no next block.
    section(&mut out, "Navigation");
    match &block.previousblockhash {
        Some(_) => field(
            &mut out,
            "Previous:",
            format_number(block.height.saturating_sub(1)),
        ),
        None => field(&mut out, "Previous:", "-"),
    }
    match &block.nextblockhash {
        Some(_) => field(&mut out, "Next:", format_number(block.height + 1)),
        None => field(&mut out, "Next:", "Latest Block"),
    }

    section(&mut out, "Summary");
    field(&mut out, "Height:", format_number(block.height));
    field(&mut out, "Confirmations:", block.confirmations);
    field(&mut out, "Size:", format_bytes(block.size));
    field(&mut out, "Version:", block.version);

    section(&mut out, "Timing & Mining");
    field(&mut out, "Time:", format_timestamp(block.time));
    field(
        &mut out,
        "Difficulty:",
        format_number(block.difficulty.round().max(0.0) as u64),
    );
    field(&mut out, "Bits:", &block.bits);

    section(&mut out, "Block Hash");
    let _ = writeln!(out, "  {}", block.hash);

    section(&mut out, "Merkle Root");
    let _ = writeln!(out, "  {}", block.merkleroot);

    section(&mut out, "Chainwork");
    let _ = writeln!(out, "  {}", block.chainwork);

    value_pools(&mut out, &block.value_pools, true);

    if !block.tx.is_empty() {
        section(
            &mut out,
            &format!("Transactions ({})", format_number(block.tx.len() as u64)),
        );
        for (i, txid) in block.tx.iter().enumerate() {
            let _ = writeln!(out, "  {:>4}. {txid}", i + 1);
        }
    }

    section(&mut out, "Nonce");
    let _ = writeln!(out, "  {}", block.nonce);

    if let Some(anchor) = &block.anchor {
        section(&mut out, "Anchor");
        let _ = writeln!(out, "  {anchor}");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> RpcEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn status_page_renders_core_sections() {
        let env = envelope(json!({
            "result": {
                "chain": "main",
                "blocks": 2600000,
                "headers": 2600000,
                "bestblockhash": "00000000015ff1ab",
                "difficulty": 71428891.2,
                "verificationprogress": 0.9998,
                "chainwork": "0000000000000000000000000000000000000000000000000000015ff1abcdef",
                "pruned": false,
                "size_on_disk": 31457280u64,
                "valuePools": [
                    {"id": "sapling", "monitored": true, "chainValue": 512345.5}
                ],
                "upgrades": {
                    "76b809bb": {"name": "Sapling", "activationheight": 419200,
                                  "status": "active", "info": ""}
                },
                "consensus": {"chaintip": "c2d6d0b4", "nextblock": "c2d6d0b4"}
            },
            "error": null,
            "id": "1"
        }));

        let page = render_chain_status(&env);
        assert!(page.contains("Chain:            main"));
        assert!(page.contains("Blocks:           2,600,000"));
        assert!(page.contains("99.9800%"));
        assert!(page.contains("30.00 MB"));
        assert!(page.contains("Sapling"));
        assert!(page.contains("419,200"));
        assert!(page.contains("sapling   512,345.5 ZEC"));
        assert!(page.contains("Chain Tip:        c2d6d0b4"));
    }

    #[test]
    fn status_page_renders_error_banner() {
        let env = envelope(json!({
            "result": null,
            "error": {"code": -28, "message": "Loading block index..."},
            "id": "1"
        }));
        let page = render_chain_status(&env);
        assert!(page.contains("Error: Loading block index... (code -28)"));
        assert!(!page.contains("Network"));
    }

    #[test]
    fn block_page_renders_navigation_and_sections() {
        let env = envelope(json!({
            "result": {
                "hash": "000000000122",
                "height": 2600000,
                "confirmations": 12,
                "size": 1995,
                "version": 4,
                "merkleroot": "m00t",
                "tx": ["aa", "bb"],
                "time": 1700000000,
                "nonce": "6e6f6e6365",
                "bits": "1c4a47c4",
                "difficulty": 52871628.5,
                "chainwork": "cw",
                "valuePools": [
                    {"id": "orchard", "monitored": true, "chainValue": 100.0,
                     "valueDelta": -1.25}
                ],
                "previousblockhash": "00aa",
                "nextblockhash": "00bb"
            },
            "error": null,
            "id": "1"
        }));

        let class = Classification::Height(2_600_000);
        let page = render_block("2600000", &class, &env);
        assert!(page.starts_with("Block 2,600,000\n"));
        assert!(page.contains("Previous:         2,599,999"));
        assert!(page.contains("Next:             2,600,001"));
        assert!(page.contains("Transactions (2)"));
        assert!(page.contains("   1. aa"));
        assert!(page.contains("-1.25 ZEC"));
        assert!(!page.contains("Anchor"));
    }

    #[test]
    fn tip_block_shows_latest_block() {
        let env = envelope(json!({
            "result": {
                "hash": "0000",
                "height": 5,
                "previousblockhash": "00aa"
            },
            "error": null,
            "id": "1"
        }));
        let class = Classification::Height(5);
        let page = render_block("5", &class, &env);
        assert!(page.contains("Next:             Latest Block"));
    }

    #[test]
    fn pending_heading_truncates_hashes_only() {
        let hash = "00000000015ff1abcdef00000000015ff1abcdef00000000015ff1abcdef0000";
        let empty = RpcEnvelope::default();
        let page = render_block(hash, &Classification::Hash, &empty);
        assert!(page.starts_with("Block 0000000001...abcdef0000\n"));

        let page = render_block("42", &Classification::Height(42), &empty);
        assert!(page.starts_with("Block 42\n"));
        assert!(page.contains("No data."));
    }

    #[test]
    fn not_found_error_is_rendered_not_thrown() {
        let env = envelope(json!({
            "result": null,
            "error": {"code": -5, "message": "Block not found"},
            "id": "1"
        }));
        let page = render_block("99999999", &Classification::Height(99_999_999), &env);
        assert!(page.contains("Error: Block not found (code -5)"));
    }
}
