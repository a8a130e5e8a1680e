//! Synthetic coinbase transaction

use super::constants::{
    COINBASE_UNLOCK_WINDOW, EXTRA_LEN, HASH_SIZE, RCT_TYPE_NULL, RESERVED_SIZE,
    TXIN_GEN, TXOUT_TAGGED_KEY, TX_EXTRA_NONCE, TX_VERSION,
};
use super::varint;
use bytes::{BufMut, BytesMut};
use tracing::debug;

/// Serialized coinbase together with the position of its reserved region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coinbase {
    bytes: Vec<u8>,
    reserved_offset: usize,
}

impl Coinbase {
    /// Raw transaction bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Offset of the zero-filled merge-mining region, relative to the transaction start
    pub fn reserved_offset(&self) -> usize {
        self.reserved_offset
    }

    /// The reserved region itself
    pub fn reserved(&self) -> &[u8] {
        &self.bytes[self.reserved_offset..self.reserved_offset + RESERVED_SIZE]
    }

    /// Length of the serialized transaction
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the transaction is empty (never true for a built coinbase)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hex of the transaction
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

/// Builds the coinbase for a block at a given height
///
/// The output depends on the height alone. A wallet address may be attached, but it is
/// not written into the transaction: the placeholder output key stays zeroed.
#[derive(Debug, Clone)]
pub struct CoinbaseBuilder {
    height: u64,
    wallet_address: Option<String>,
}

impl CoinbaseBuilder {
    /// Create a builder for `height`
    pub fn new(height: u64) -> Self {
        Self {
            height,
            wallet_address: None,
        }
    }

    /// Attach the miner's wallet address
    pub fn with_wallet_address(mut self, address: impl Into<String>) -> Self {
        self.wallet_address = Some(address.into());
        self
    }

    /// Serialize the transaction
    pub fn build(self) -> Coinbase {
        if let Some(address) = &self.wallet_address {
            debug!(height = self.height, %address, "wallet address not encoded in coinbase");
        }

        let mut buf = BytesMut::with_capacity(128);

        buf.put_u8(TX_VERSION);
        varint::write(&mut buf, self.height.saturating_add(COINBASE_UNLOCK_WINDOW));

        // vin: a single gen input carrying the height
        buf.put_u8(1);
        buf.put_u8(TXIN_GEN);
        varint::write(&mut buf, self.height);

        // vout: one zero-amount output to a placeholder key
        buf.put_u8(1);
        buf.put_u8(0);
        buf.put_u8(TXOUT_TAGGED_KEY);
        buf.put_bytes(0, HASH_SIZE);

        varint::write(&mut buf, EXTRA_LEN);
        buf.put_u8(TX_EXTRA_NONCE);
        varint::write(&mut buf, EXTRA_LEN - 2);
        let reserved_offset = buf.len();
        buf.put_bytes(0, RESERVED_SIZE);

        buf.put_u8(RCT_TYPE_NULL);

        Coinbase {
            bytes: buf.to_vec(),
            reserved_offset,
        }
    }
}
