//! Base-128 varint codec used by the daemon's binary formats
//!
//! Seven payload bits per byte, least significant group first, high bit set on every
//! byte except the last.

use crate::error::{Error, Result};
use bytes::BufMut;

/// Maximum encoded length of a `u64`
pub const MAX_VARINT_LEN: usize = 10;

/// Encode `n` into a fresh byte vector
pub fn encode(n: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(n));
    write(&mut out, n);
    out
}

/// Append the encoding of `n` to `buf`
pub fn write<B: BufMut>(buf: &mut B, mut n: u64) {
    while n >= 0x80 {
        buf.put_u8((n & 0x7f) as u8 | 0x80);
        n >>= 7;
    }
    buf.put_u8(n as u8);
}

/// Number of bytes `encode(n)` produces
pub fn encoded_len(n: u64) -> usize {
    let bits = 64 - n.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Decode a varint from the front of `bytes`, returning the value and bytes consumed
pub fn decode(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut value: u64 = 0;

    for (i, &byte) in bytes.iter().enumerate().take(MAX_VARINT_LEN) {
        let group = u64::from(byte & 0x7f);
        let shift = 7 * i as u32;

        if shift == 63 && group > 1 {
            return Err(Error::varint("value overflows 64 bits"));
        }
        value |= group << shift;

        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    if bytes.len() >= MAX_VARINT_LEN {
        Err(Error::varint("value overflows 64 bits"))
    } else {
        Err(Error::varint(format!(
            "truncated after {} bytes",
            bytes.len()
        )))
    }
}
