//! Hashing helpers
//!
//! The mock daemon only needs deterministic digests, not real chain hashes: SHA-256 stands
//! in for both the transaction tree root and the block id.

use crate::core::constants::HASH_SIZE;
use sha2::{Digest, Sha256};

/// SHA-256 of `data`
pub fn sha256(data: impl AsRef<[u8]>) -> [u8; HASH_SIZE] {
    Sha256::digest(data.as_ref()).into()
}

/// Placeholder transaction tree root for a block at `height`
pub fn tree_root(height: u64) -> [u8; HASH_SIZE] {
    sha256(format!("merkle_{}", height))
}

/// Id assigned to a submitted block, computed over the blob exactly as it was received
pub fn block_id(blob: &str) -> [u8; HASH_SIZE] {
    sha256(blob.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_tree_root_is_deterministic() {
        assert_eq!(tree_root(1_000_000), tree_root(1_000_000));
        assert_ne!(tree_root(1_000_000), tree_root(1_000_001));
        assert_eq!(tree_root(7), sha256("merkle_7"));
    }

    #[test]
    fn test_block_id_hashes_blob_text() {
        assert_eq!(block_id("deadbeef"), sha256("deadbeef"));
        assert_ne!(block_id("deadbeef"), block_id("deadbeee"));
    }
}
