//! Block template construction and chain state
//!
//! This module contains the byte-level pieces of the mock daemon: the varint codec,
//! the synthetic coinbase transaction, the two template blobs and the shared chain state
//! that ties them together.

mod chain;
mod coinbase;
mod template;
pub mod varint;

pub use chain::{ChainInfo, ChainState, ChainStateConfig, SubmitStatus, SubmittedBlock};
pub use coinbase::{Coinbase, CoinbaseBuilder};
pub use template::{BlockTemplate, BlockTemplateBuilder};

/// Constants for the daemon's block and transaction formats
pub mod constants {
    /// Size of a hash in bytes
    pub const HASH_SIZE: usize = 32;

    /// Size of the header nonce in bytes
    pub const NONCE_SIZE: usize = 4;

    /// Major and minor block version (hard fork 14)
    pub const BLOCK_VERSION: u8 = 0x0e;

    /// Coinbase transaction version (RingCT)
    pub const TX_VERSION: u8 = 0x02;

    /// Blocks between coinbase creation and spendability
    pub const COINBASE_UNLOCK_WINDOW: u64 = 60;

    /// Input type marker for a coinbase ("gen") input
    pub const TXIN_GEN: u8 = 0xff;

    /// Output target type for a tagged key
    pub const TXOUT_TAGGED_KEY: u8 = 0x02;

    /// Length of the coinbase extra field
    pub const EXTRA_LEN: u64 = 64;

    /// Extra field sub-tag for an extra nonce
    pub const TX_EXTRA_NONCE: u8 = 0x02;

    /// Bytes left zeroed inside the extra nonce for the merge-mining tag
    pub const RESERVED_SIZE: usize = (EXTRA_LEN - 3) as usize;

    /// RingCT type of the coinbase (null)
    pub const RCT_TYPE_NULL: u8 = 0x00;

    /// Blocks per RandomX seed epoch
    pub const SEED_EPOCH_BLOCKS: u64 = 2048;

    /// Reward advertised in every template, in atomic units
    pub const EXPECTED_REWARD: u64 = 600_000_000_000;

    /// Seed epoch boundary for `height`
    pub fn seed_height(height: u64) -> u64 {
        height - (height % SEED_EPOCH_BLOCKS)
    }
}
