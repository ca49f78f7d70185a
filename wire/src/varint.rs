//! Base-128 varints, the backbone of the wire format: keys, lengths and all
//! integer scalars travel in this form.

use anyhow::{bail, ensure};
use bytes::{Buf, BufMut};

use crate::XtraceResult;

/// Number of bytes the varint form of `value` occupies (1 to 10).
pub fn varint_len(value: u64) -> usize {
    ((64 - (value | 1).leading_zeros() as usize) + 6) / 7
}

/// Append `value` in varint form.
pub fn encode_varint(mut value: u64, buf: &mut impl BufMut) {
    while value >= 0x80 {
        buf.put_u8(value as u8 | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Read one varint. Rejects truncated runs and runs that do not fit in 64
/// bits (more than 10 bytes, or a 10th byte above 0x01).
pub fn decode_varint(buf: &mut impl Buf) -> XtraceResult<u64> {
    let mut value = 0u64;
    for count in 0..10 {
        ensure!(buf.has_remaining(), "truncated varint");
        let byte = buf.get_u8();
        if count == 9 && byte > 0x01 {
            bail!("varint overflows 64 bits");
        }
        value |= ((byte & 0x7f) as u64) << (7 * count);
        if byte < 0x80 {
            return Ok(value);
        }
    }
    bail!("varint runs over 10 bytes")
}

/// Map a signed value on the unsigned line so that small magnitudes stay
/// small: 0, -1, 1, -2, ... become 0, 1, 2, 3, ...
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

pub fn zigzag_decode(value: u64) -> i64 {
    (value >> 1) as i64 ^ -((value & 1) as i64)
}
