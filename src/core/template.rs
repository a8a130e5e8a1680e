//! Block template blobs
//!
//! Two serializations of the same prospective block are handed to miners:
//!
//! - the *template blob*: header, coinbase transaction and the (empty) list of other
//!   transaction hashes. This is what gets submitted once a share meets the block target.
//! - the *hashing blob*: header, transaction tree root and transaction count. This is the
//!   fixed-shape payload proof-of-work is computed over.
//!
//! Both share the same header prefix, so the nonce sits at the same offset in each.

use super::coinbase::{Coinbase, CoinbaseBuilder};
use super::constants::{seed_height, BLOCK_VERSION, HASH_SIZE, NONCE_SIZE};
use super::varint;
use crate::crypto;
use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

/// Point-in-time block template handed out by `get_block_template`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTemplate {
    /// Full block blob, hex
    pub blocktemplate_blob: String,
    /// Proof-of-work hashing blob, hex
    pub blockhashing_blob: String,
    /// Network difficulty
    pub difficulty: u64,
    /// Height of the block being built
    pub height: u64,
    /// Id of the block this template builds on, hex
    pub prev_hash: String,
    /// Byte offset into the template blob of the reserved merge-mining region
    pub reserved_offset: usize,
    /// RandomX seed hash, hex
    pub seed_hash: String,
    /// First height of the current seed epoch
    pub seed_height: u64,
}

impl BlockTemplate {
    /// Decoded template blob
    pub fn template_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.blocktemplate_blob)
    }

    /// Decoded hashing blob
    pub fn hashing_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.blockhashing_blob)
    }
}

/// Serializes header, coinbase and hashing blob for one block
#[derive(Debug, Clone)]
pub struct BlockTemplateBuilder {
    timestamp: u64,
    prev_hash: [u8; HASH_SIZE],
    height: u64,
    coinbase: Coinbase,
}

impl BlockTemplateBuilder {
    /// Create a builder with a freshly built coinbase for `height`
    pub fn new(timestamp: u64, prev_hash: [u8; HASH_SIZE], height: u64) -> Self {
        Self::with_coinbase(timestamp, prev_hash, height, CoinbaseBuilder::new(height).build())
    }

    /// Create a builder around an already built coinbase
    pub fn with_coinbase(
        timestamp: u64,
        prev_hash: [u8; HASH_SIZE],
        height: u64,
        coinbase: Coinbase,
    ) -> Self {
        Self {
            timestamp,
            prev_hash,
            height,
            coinbase,
        }
    }

    /// The embedded coinbase
    pub fn coinbase(&self) -> &Coinbase {
        &self.coinbase
    }

    /// Length of the shared header: versions, timestamp, prev hash, nonce
    pub fn header_len(&self) -> usize {
        2 + varint::encoded_len(self.timestamp) + HASH_SIZE + NONCE_SIZE
    }

    /// Offset of the nonce within either blob
    pub fn nonce_offset(&self) -> usize {
        self.header_len() - NONCE_SIZE
    }

    /// Offset of the reserved merge-mining region within the template blob
    pub fn reserved_offset(&self) -> usize {
        self.header_len() + self.coinbase.reserved_offset()
    }

    fn put_header(&self, buf: &mut BytesMut) {
        buf.put_u8(BLOCK_VERSION);
        buf.put_u8(BLOCK_VERSION);
        varint::write(buf, self.timestamp);
        buf.put_slice(&self.prev_hash);
        buf.put_u32_le(0);
    }

    /// Header, tree root and transaction count
    ///
    /// The trailing count varint goes beyond the mock's listed hashing fields, as real
    /// daemons append it.
    pub fn hashing_blob(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.header_len() + HASH_SIZE + 1);
        self.put_header(&mut buf);
        buf.put_slice(&crypto::tree_root(self.height));
        // the coinbase is the only transaction
        varint::write(&mut buf, 1);
        buf.to_vec()
    }

    /// Header, coinbase and the count of non-coinbase transaction hashes
    pub fn template_blob(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.header_len() + self.coinbase.len() + 1);
        self.put_header(&mut buf);
        buf.put_slice(self.coinbase.as_bytes());
        varint::write(&mut buf, 0);
        buf.to_vec()
    }

    /// Assemble the RPC-facing template
    pub fn build(&self, difficulty: u64, seed_hash: &[u8; HASH_SIZE]) -> BlockTemplate {
        BlockTemplate {
            blocktemplate_blob: hex::encode(self.template_blob()),
            blockhashing_blob: hex::encode(self.hashing_blob()),
            difficulty,
            height: self.height,
            prev_hash: hex::encode(self.prev_hash),
            reserved_offset: self.reserved_offset(),
            seed_hash: hex::encode(seed_hash),
            seed_height: seed_height(self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::RESERVED_SIZE;
    use pretty_assertions::assert_eq;

    // 2024-01-01T00:00:00Z, a five-byte varint like every current Unix time
    const TIMESTAMP: u64 = 1_704_067_200;
    const PREV: [u8; HASH_SIZE] = [0x11; HASH_SIZE];

    fn builder() -> BlockTemplateBuilder {
        BlockTemplateBuilder::new(TIMESTAMP, PREV, 1_000_000)
    }

    #[test]
    fn test_header_layout() {
        let blob = builder().template_blob();
        assert_eq!(blob[0], BLOCK_VERSION);
        assert_eq!(blob[1], BLOCK_VERSION);
        assert_eq!(&blob[2..7], varint::encode(TIMESTAMP).as_slice());
        assert_eq!(&blob[7..39], &PREV);
        assert_eq!(&blob[39..43], &[0, 0, 0, 0]);
        assert_eq!(builder().header_len(), 43);
        assert_eq!(builder().nonce_offset(), 39);
    }

    #[test]
    fn test_hashing_blob_is_76_bytes() {
        let blob = builder().hashing_blob();
        assert_eq!(blob.len(), 76);
        assert_eq!(&blob[43..75], &crypto::tree_root(1_000_000));
        assert_eq!(blob[75], 1);
    }

    #[test]
    fn test_hashing_blob_length_tracks_timestamp_varint() {
        let early = BlockTemplateBuilder::new(100, PREV, 1_000_000);
        assert_eq!(early.hashing_blob().len(), 72);

        let late = BlockTemplateBuilder::new(1 << 35, PREV, 1_000_000);
        assert_eq!(late.hashing_blob().len(), 77);
    }

    #[test]
    fn test_template_blob_embeds_coinbase() {
        let b = builder();
        let blob = b.template_blob();
        let header = b.header_len();
        let coinbase = b.coinbase().as_bytes();

        assert_eq!(&blob[header..header + coinbase.len()], coinbase);
        assert_eq!(blob.len(), header + coinbase.len() + 1);
        assert_eq!(*blob.last().unwrap(), 0);
    }

    #[test]
    fn test_reserved_offset_points_at_zeroed_region() {
        let b = builder();
        let blob = b.template_blob();
        let offset = b.reserved_offset();

        assert_eq!(offset, 90);
        assert!(blob[offset..offset + RESERVED_SIZE].iter().all(|&x| x == 0));
        // nonce sub-record length sits right before the region
        assert_eq!(blob[offset - 1], 62);
        assert_eq!(blob[offset - 2], 0x02);
    }

    #[test]
    fn test_blobs_share_header() {
        let b = builder();
        let header = b.header_len();
        assert_eq!(&b.template_blob()[..header], &b.hashing_blob()[..header]);
    }

    #[test]
    fn test_build_snapshot_fields() {
        let seed = [0u8; HASH_SIZE];
        let template = builder().build(100_000, &seed);

        assert_eq!(template.height, 1_000_000);
        assert_eq!(template.seed_height, 999_424);
        assert_eq!(template.difficulty, 100_000);
        assert_eq!(template.prev_hash, "11".repeat(32));
        assert_eq!(template.seed_hash, "0".repeat(64));
        assert_eq!(template.reserved_offset, 90);
        assert_eq!(template.hashing_bytes().unwrap().len(), 76);
        assert_eq!(
            template.template_bytes().unwrap(),
            builder().template_blob()
        );
    }

    #[test]
    fn test_writing_tag_into_reserved_region() {
        let b = builder();
        let mut blob = b.template_blob();
        let offset = b.reserved_offset();
        let tag = [0xab; 32];

        blob[offset..offset + tag.len()].copy_from_slice(&tag);

        let header = b.header_len();
        let coinbase = &blob[header..blob.len() - 1];
        let patched = &coinbase[b.coinbase().reserved_offset()..][..tag.len()];
        assert_eq!(patched, &tag);
        // RingCT terminator and transaction count untouched
        assert_eq!(&blob[blob.len() - 2..], &[0, 0]);
    }
}
