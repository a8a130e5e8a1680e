//! Shared chain state
//!
//! A single mutex guards height, prev hash and the accepted-block log. Every operation
//! holds it from the first read to the last write, so a template is never built from a
//! height that moves underneath it and two submissions never advance from the same base.

use super::constants::HASH_SIZE;
use super::coinbase::CoinbaseBuilder;
use super::template::{BlockTemplate, BlockTemplateBuilder};
use crate::crypto;
use crate::utils::current_timestamp;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Initial values for a chain state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStateConfig {
    /// Height of the first template
    pub height: u64,
    /// Fixed network difficulty
    pub difficulty: u64,
    /// RandomX seed hash
    pub seed_hash: [u8; HASH_SIZE],
    /// Prev hash of the first template
    pub prev_hash: [u8; HASH_SIZE],
}

impl Default for ChainStateConfig {
    fn default() -> Self {
        Self {
            height: 1_000_000,
            difficulty: 100_000,
            seed_hash: [0x00; HASH_SIZE],
            prev_hash: [0x11; HASH_SIZE],
        }
    }
}

/// Record of an accepted block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedBlock {
    /// Blob exactly as submitted
    pub blob: String,
    /// Height the block was accepted at
    pub height: u64,
    /// Unix time of acceptance, in seconds
    pub timestamp: u64,
}

/// Outcome of a block submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitStatus {
    /// Block accepted
    #[serde(rename = "OK")]
    Ok,
}

impl SubmitStatus {
    /// Status string reported over RPC
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitStatus::Ok => "OK",
        }
    }
}

/// Height and difficulty read under one lock acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainInfo {
    /// Current height
    pub height: u64,
    /// Current difficulty
    pub difficulty: u64,
}

#[derive(Debug)]
struct Inner {
    height: u64,
    difficulty: u64,
    seed_hash: [u8; HASH_SIZE],
    prev_hash: [u8; HASH_SIZE],
    submitted_blocks: Vec<SubmittedBlock>,
}

/// Mutable chain state shared by all request handlers
#[derive(Debug)]
pub struct ChainState {
    inner: Mutex<Inner>,
}

impl ChainState {
    /// Create a chain state from initial values
    pub fn new(config: ChainStateConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                height: config.height,
                difficulty: config.difficulty,
                seed_hash: config.seed_hash,
                prev_hash: config.prev_hash,
                submitted_blocks: Vec::new(),
            }),
        }
    }

    /// Build a template for the next block, stamped with the current time
    pub fn block_template(&self, wallet_address: &str) -> BlockTemplate {
        self.block_template_at(wallet_address, current_timestamp())
    }

    /// Build a template for the next block with an explicit header timestamp
    pub fn block_template_at(&self, wallet_address: &str, timestamp: u64) -> BlockTemplate {
        let inner = self.inner.lock();

        let mut coinbase = CoinbaseBuilder::new(inner.height);
        if !wallet_address.is_empty() {
            coinbase = coinbase.with_wallet_address(wallet_address);
        }

        let builder = BlockTemplateBuilder::with_coinbase(
            timestamp,
            inner.prev_hash,
            inner.height,
            coinbase.build(),
        );
        let template = builder.build(inner.difficulty, &inner.seed_hash);

        debug!(
            height = template.height,
            reserved_offset = template.reserved_offset,
            "Built block template"
        );
        template
    }

    /// Accept a block unconditionally and advance the chain
    ///
    /// At `u64::MAX` the block is still recorded but the height stays put.
    pub fn submit_block(&self, blob: &str) -> SubmitStatus {
        let mut inner = self.inner.lock();

        let height = inner.height;
        inner.submitted_blocks.push(SubmittedBlock {
            blob: blob.to_string(),
            height,
            timestamp: current_timestamp(),
        });
        inner.prev_hash = crypto::block_id(blob);
        match height.checked_add(1) {
            Some(next) => inner.height = next,
            None => warn!(height, "Chain height at u64::MAX, not advancing"),
        }

        info!(
            accepted_height = height,
            new_height = inner.height,
            prev_hash = %hex::encode(inner.prev_hash),
            "Block submitted"
        );
        SubmitStatus::Ok
    }

    /// Current height
    pub fn height(&self) -> u64 {
        self.inner.lock().height
    }

    /// Current difficulty
    pub fn difficulty(&self) -> u64 {
        self.inner.lock().difficulty
    }

    /// Height and difficulty together
    pub fn info(&self) -> ChainInfo {
        let inner = self.inner.lock();
        ChainInfo {
            height: inner.height,
            difficulty: inner.difficulty,
        }
    }

    /// Hex id of the current chain tip
    pub fn prev_hash(&self) -> String {
        hex::encode(self.inner.lock().prev_hash)
    }

    /// Copy of the accepted-block log, oldest first
    pub fn submitted_blocks(&self) -> Vec<SubmittedBlock> {
        self.inner.lock().submitted_blocks.clone()
    }

    /// Number of blocks accepted so far
    pub fn submitted_count(&self) -> usize {
        self.inner.lock().submitted_blocks.len()
    }
}

impl Default for ChainState {
    fn default() -> Self {
        Self::new(ChainStateConfig::default())
    }
}
