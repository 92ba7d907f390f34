//! Typed results for the RPC methods bound in [`super::PeercoinRpc`].

use bitcoin::BlockHash;
use serde::Deserialize;

// ==============================================================================
// Chain Info
// ==============================================================================

/// Chain state from `getblockchaininfo`.
///
/// Only `chain`, `blocks` and `bestblockhash` are required; the remaining
/// fields vary across node versions and are kept optional.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainInfo {
    pub chain: String,
    pub blocks: u64,
    #[serde(default)]
    pub headers: Option<u64>,
    #[serde(rename = "bestblockhash")]
    pub best_block_hash: BlockHash,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default, rename = "mediantime")]
    pub median_time: Option<u64>,
    #[serde(default, rename = "verificationprogress")]
    pub verification_progress: Option<f64>,
    #[serde(default, rename = "initialblockdownload")]
    pub initial_block_download: Option<bool>,
    #[serde(default)]
    pub chainwork: Option<String>,
    #[serde(default)]
    pub size_on_disk: Option<u64>,
    #[serde(default)]
    pub pruned: bool,
    /// A string on older nodes, a list of strings on newer ones.
    #[serde(default)]
    pub warnings: Option<serde_json::Value>,
}

// ==============================================================================
// Difficulty
// ==============================================================================

/// Network difficulty.
///
/// Peercoin reports proof-of-work and proof-of-stake difficulty separately;
/// Bitcoin-style nodes report a single number.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Difficulty {
    Single(f64),
    Split {
        #[serde(rename = "proof-of-work")]
        proof_of_work: f64,
        #[serde(rename = "proof-of-stake")]
        proof_of_stake: f64,
    },
}

impl Difficulty {
    pub fn proof_of_work(&self) -> f64 {
        match self {
            Self::Single(value) => *value,
            Self::Split { proof_of_work, .. } => *proof_of_work,
        }
    }
}
