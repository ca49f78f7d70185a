//! Field keys: `(field_number << 3) | wire_type`, varint-encoded.

use anyhow::{bail, ensure};
use bytes::{Buf, BufMut};

use crate::XtraceResult;
use crate::varint::{decode_varint, encode_varint, varint_len};

/// Largest admissible field number (29 bits).
pub const MAX_FIELD: u32 = (1 << 29) - 1;

/// The payload form announced by the 3 low bits of a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireType {
    pub fn from_key_bits(bits: u64) -> XtraceResult<WireType> {
        Ok(match bits {
            0 => WireType::Varint,
            1 => WireType::Fixed64,
            2 => WireType::LengthDelimited,
            3 => WireType::StartGroup,
            4 => WireType::EndGroup,
            5 => WireType::Fixed32,
            _ => bail!("unknown wire type {}", bits),
        })
    }
}

pub fn encode_key(field: u32, wire_type: WireType, buf: &mut impl BufMut) {
    debug_assert!(field >= 1 && field <= MAX_FIELD, "field number {field} out of range");
    encode_varint((field as u64) << 3 | wire_type as u64, buf);
}

pub fn key_len(field: u32) -> usize {
    varint_len((field as u64) << 3)
}

pub fn decode_key(buf: &mut impl Buf) -> XtraceResult<(u32, WireType)> {
    let key = decode_varint(buf)?;
    ensure!(key >> 3 <= MAX_FIELD as u64, "field number {} out of range", key >> 3);
    let field = (key >> 3) as u32;
    ensure!(field != 0, "field number 0 is invalid");
    Ok((field, WireType::from_key_bits(key & 0x07)?))
}
