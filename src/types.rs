//! Typed views of the zcashd RPC payloads rendered by the front end.
//!
//! Every field defaults when absent — the node's schema is not owned by this
//! crate and is never validated, so a missing field renders as zero/empty
//! rather than failing the page.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shielded-value accounting bucket, embedded in both block and chain info.
/// The delta fields only appear on per-block entries.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ValuePool {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub monitored: bool,
    #[serde(default, rename = "chainValue")]
    pub chain_value: f64,
    #[serde(default, rename = "chainValueZat")]
    pub chain_value_zat: i64,
    #[serde(default, rename = "valueDelta")]
    pub value_delta: Option<f64>,
    #[serde(default, rename = "valueDeltaZat")]
    pub value_delta_zat: Option<i64>,
}

/// `getblock` result
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BlockInfo {
    #[serde(default)]
    pub hash: String,
    /// Negative for blocks off the best chain
    #[serde(default)]
    pub confirmations: i64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub height: u64,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub merkleroot: String,
    #[serde(default)]
    pub tx: Vec<String>,
    /// Unix seconds
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub nonce: String,
    /// Equihash solution
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub bits: String,
    #[serde(default)]
    pub difficulty: f64,
    #[serde(default)]
    pub chainwork: String,
    #[serde(default)]
    pub anchor: Option<String>,
    #[serde(default, rename = "valuePools")]
    pub value_pools: Vec<ValuePool>,
    #[serde(default)]
    pub previousblockhash: Option<String>,
    #[serde(default)]
    pub nextblockhash: Option<String>,
}

/// Consensus rule-change record (`softforks` map entries)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SoftFork {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub height: u64,
}

/// Network upgrade record (`upgrades` map entries, keyed by branch id)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NetworkUpgrade {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub activationheight: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub info: String,
}

/// Consensus branch pointers
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Consensus {
    #[serde(default)]
    pub chaintip: String,
    #[serde(default)]
    pub nextblock: String,
}

/// `getblockchaininfo` result
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BlockchainInfo {
    #[serde(default)]
    pub chain: String,
    #[serde(default)]
    pub blocks: u64,
    #[serde(default)]
    pub headers: u64,
    #[serde(default)]
    pub bestblockhash: String,
    #[serde(default)]
    pub difficulty: f64,
    /// 0.0 - 1.0
    #[serde(default)]
    pub verificationprogress: f64,
    #[serde(default)]
    pub chainwork: String,
    #[serde(default)]
    pub pruned: bool,
    #[serde(default)]
    pub size_on_disk: u64,
    #[serde(default)]
    pub commitments: u64,
    #[serde(default, rename = "valuePools")]
    pub value_pools: Vec<ValuePool>,
    // Ordered maps so rendered tables are deterministic
    #[serde(default)]
    pub softforks: BTreeMap<String, SoftFork>,
    #[serde(default)]
    pub upgrades: BTreeMap<String, NetworkUpgrade>,
    #[serde(default)]
    pub consensus: Consensus,
    /// Only present while still syncing
    #[serde(default)]
    pub estimatedheight: Option<u64>,
}
