//! Field-level encoding and decoding helpers.
//!
//! Message implementations call `emit_*` from `encode_raw`, the matching
//! `len_*` from `encoded_len`, and `read_*`/`merge_*` from `merge_field`.
//! Emitters append a key followed by the payload; they do not decide whether
//! a default-valued field should be written, that is the caller's call (a
//! singular proto3 field is skipped, a map entry key is skipped inside the
//! entry, a repeated element is always written).

use std::collections::HashMap;

use anyhow::{Context, bail, ensure};
use bytes::{Buf, BufMut};

use crate::XtraceResult;
use crate::key::{WireType, decode_key, encode_key, key_len};
use crate::message::{DecodeContext, Message};
use crate::varint::{decode_varint, encode_varint, varint_len, zigzag_decode, zigzag_encode};

fn read_raw_varint(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<u64> {
    ensure!(wire_type == WireType::Varint, "expected a varint payload, got {:?}", wire_type);
    decode_varint(buf)
}

/// Length prefix of a length-delimited payload, checked against the buffer.
fn delimited_len(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<usize> {
    ensure!(
        wire_type == WireType::LengthDelimited,
        "expected a length-delimited payload, got {:?}",
        wire_type
    );
    let len = decode_varint(buf)?;
    ensure!(
        len <= buf.remaining() as u64,
        "length prefix {} overruns the buffer ({} bytes left)",
        len,
        buf.remaining()
    );
    Ok(len as usize)
}

// --- varint scalars ---

pub fn emit_int64(field: u32, value: i64, buf: &mut impl BufMut) {
    encode_key(field, WireType::Varint, buf);
    encode_varint(value as u64, buf);
}

pub fn len_int64(field: u32, value: i64) -> usize {
    key_len(field) + varint_len(value as u64)
}

pub fn read_int64(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<i64> {
    Ok(read_raw_varint(wire_type, buf)? as i64)
}

/// Negative int32 values are sign-extended to 10 bytes, as the reference
/// encoding mandates.
pub fn emit_int32(field: u32, value: i32, buf: &mut impl BufMut) {
    emit_int64(field, value as i64, buf)
}

pub fn len_int32(field: u32, value: i32) -> usize {
    len_int64(field, value as i64)
}

pub fn read_int32(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<i32> {
    Ok(read_raw_varint(wire_type, buf)? as i32)
}

pub fn emit_uint64(field: u32, value: u64, buf: &mut impl BufMut) {
    encode_key(field, WireType::Varint, buf);
    encode_varint(value, buf);
}

pub fn len_uint64(field: u32, value: u64) -> usize {
    key_len(field) + varint_len(value)
}

pub fn read_uint64(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<u64> {
    read_raw_varint(wire_type, buf)
}

pub fn emit_uint32(field: u32, value: u32, buf: &mut impl BufMut) {
    emit_uint64(field, value as u64, buf)
}

pub fn len_uint32(field: u32, value: u32) -> usize {
    len_uint64(field, value as u64)
}

pub fn read_uint32(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<u32> {
    Ok(read_raw_varint(wire_type, buf)? as u32)
}

pub fn emit_sint64(field: u32, value: i64, buf: &mut impl BufMut) {
    emit_uint64(field, zigzag_encode(value), buf)
}

pub fn len_sint64(field: u32, value: i64) -> usize {
    len_uint64(field, zigzag_encode(value))
}

pub fn read_sint64(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<i64> {
    Ok(zigzag_decode(read_raw_varint(wire_type, buf)?))
}

pub fn emit_sint32(field: u32, value: i32, buf: &mut impl BufMut) {
    emit_sint64(field, value as i64, buf)
}

pub fn len_sint32(field: u32, value: i32) -> usize {
    len_sint64(field, value as i64)
}

pub fn read_sint32(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<i32> {
    Ok(read_sint64(wire_type, buf)? as i32)
}

pub fn emit_bool(field: u32, value: bool, buf: &mut impl BufMut) {
    emit_uint64(field, value as u64, buf)
}

pub fn len_bool(field: u32, _value: bool) -> usize {
    key_len(field) + 1
}

pub fn read_bool(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<bool> {
    Ok(read_raw_varint(wire_type, buf)? != 0)
}

/// Enums travel as open int32: unknown values are carried, not rejected.
pub fn emit_enum(field: u32, value: i32, buf: &mut impl BufMut) {
    emit_int32(field, value, buf)
}

pub fn len_enum(field: u32, value: i32) -> usize {
    len_int32(field, value)
}

pub fn read_enum(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<i32> {
    read_int32(wire_type, buf)
}

// --- fixed-width scalars ---

pub fn emit_fixed64(field: u32, value: u64, buf: &mut impl BufMut) {
    encode_key(field, WireType::Fixed64, buf);
    buf.put_u64_le(value);
}

pub fn len_fixed64(field: u32, _value: u64) -> usize {
    key_len(field) + 8
}

pub fn read_fixed64(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<u64> {
    ensure!(wire_type == WireType::Fixed64, "expected a fixed64 payload, got {:?}", wire_type);
    ensure!(buf.remaining() >= 8, "truncated fixed64 payload");
    Ok(buf.get_u64_le())
}

pub fn emit_sfixed64(field: u32, value: i64, buf: &mut impl BufMut) {
    emit_fixed64(field, value as u64, buf)
}

pub fn len_sfixed64(field: u32, value: i64) -> usize {
    len_fixed64(field, value as u64)
}

pub fn read_sfixed64(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<i64> {
    Ok(read_fixed64(wire_type, buf)? as i64)
}

pub fn emit_double(field: u32, value: f64, buf: &mut impl BufMut) {
    encode_key(field, WireType::Fixed64, buf);
    buf.put_f64_le(value);
}

pub fn len_double(field: u32, _value: f64) -> usize {
    key_len(field) + 8
}

pub fn read_double(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<f64> {
    Ok(f64::from_bits(read_fixed64(wire_type, buf)?))
}

pub fn emit_fixed32(field: u32, value: u32, buf: &mut impl BufMut) {
    encode_key(field, WireType::Fixed32, buf);
    buf.put_u32_le(value);
}

pub fn len_fixed32(field: u32, _value: u32) -> usize {
    key_len(field) + 4
}

pub fn read_fixed32(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<u32> {
    ensure!(wire_type == WireType::Fixed32, "expected a fixed32 payload, got {:?}", wire_type);
    ensure!(buf.remaining() >= 4, "truncated fixed32 payload");
    Ok(buf.get_u32_le())
}

pub fn emit_sfixed32(field: u32, value: i32, buf: &mut impl BufMut) {
    emit_fixed32(field, value as u32, buf)
}

pub fn len_sfixed32(field: u32, value: i32) -> usize {
    len_fixed32(field, value as u32)
}

pub fn read_sfixed32(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<i32> {
    Ok(read_fixed32(wire_type, buf)? as i32)
}

pub fn emit_float(field: u32, value: f32, buf: &mut impl BufMut) {
    encode_key(field, WireType::Fixed32, buf);
    buf.put_f32_le(value);
}

pub fn len_float(field: u32, _value: f32) -> usize {
    key_len(field) + 4
}

pub fn read_float(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<f32> {
    Ok(f32::from_bits(read_fixed32(wire_type, buf)?))
}

// --- length-delimited scalars ---

pub fn emit_bytes(field: u32, value: &[u8], buf: &mut impl BufMut) {
    encode_key(field, WireType::LengthDelimited, buf);
    encode_varint(value.len() as u64, buf);
    buf.put_slice(value);
}

pub fn len_bytes(field: u32, value: &[u8]) -> usize {
    key_len(field) + varint_len(value.len() as u64) + value.len()
}

pub fn read_bytes(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<Vec<u8>> {
    let len = delimited_len(wire_type, buf)?;
    let mut value = vec![0u8; len];
    buf.copy_to_slice(&mut value);
    Ok(value)
}

pub fn emit_string(field: u32, value: &str, buf: &mut impl BufMut) {
    emit_bytes(field, value.as_bytes(), buf)
}

pub fn len_string(field: u32, value: &str) -> usize {
    len_bytes(field, value.as_bytes())
}

/// String payloads must hold valid UTF-8; anything else is a decode error.
pub fn read_string(wire_type: WireType, buf: &mut impl Buf) -> XtraceResult<String> {
    let bytes = read_bytes(wire_type, buf)?;
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => bail!("string field holds invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
    }
}

// --- embedded messages ---

pub fn emit_message<M: Message>(field: u32, message: &M, buf: &mut impl BufMut) {
    encode_key(field, WireType::LengthDelimited, buf);
    encode_varint(message.encoded_len() as u64, buf);
    message.encode_raw(buf);
}

pub fn len_message<M: Message>(field: u32, message: &M) -> usize {
    let inner = message.encoded_len();
    key_len(field) + varint_len(inner as u64) + inner
}

/// Decode one embedded message occurrence, merging it into `message`.
pub fn merge_message<M: Message>(
    wire_type: WireType,
    message: &mut M,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> XtraceResult<()> {
    let len = delimited_len(wire_type, buf)?;
    let ctx = ctx.enter()?;
    let limit = buf.remaining() - len;
    while buf.remaining() > limit {
        let (field, wire_type) = decode_key(buf)?;
        message
            .merge_field(field, wire_type, buf, ctx.clone())
            .with_context(|| format!("decoding field {field}"))?;
    }
    ensure!(buf.remaining() == limit, "embedded message overran its length prefix");
    Ok(())
}

/// Decode one embedded message occurrence into a fresh value (repeated
/// message fields push one of these per occurrence).
pub fn read_message<M: Message>(
    wire_type: WireType,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> XtraceResult<M> {
    let mut message = M::default();
    merge_message(wire_type, &mut message, buf, ctx)?;
    Ok(message)
}

// --- packed repeated numerics ---
//
// Encoders write the packed form (proto3 default) and write nothing for an
// empty list; mergers accept both the packed run and the one-element-per-key
// form, as decoders must.

pub fn emit_packed_int64(field: u32, values: &[i64], buf: &mut impl BufMut) {
    if values.is_empty() {
        return;
    }
    encode_key(field, WireType::LengthDelimited, buf);
    let body: usize = values.iter().map(|&v| varint_len(v as u64)).sum();
    encode_varint(body as u64, buf);
    for &value in values {
        encode_varint(value as u64, buf);
    }
}

pub fn len_packed_int64(field: u32, values: &[i64]) -> usize {
    if values.is_empty() {
        return 0;
    }
    let body: usize = values.iter().map(|&v| varint_len(v as u64)).sum();
    key_len(field) + varint_len(body as u64) + body
}

pub fn merge_repeated_int64(
    wire_type: WireType,
    values: &mut Vec<i64>,
    buf: &mut impl Buf,
) -> XtraceResult<()> {
    merge_repeated_varint(wire_type, buf, |raw| values.push(raw as i64))
}

pub fn emit_packed_int32(field: u32, values: &[i32], buf: &mut impl BufMut) {
    if values.is_empty() {
        return;
    }
    encode_key(field, WireType::LengthDelimited, buf);
    let body: usize = values.iter().map(|&v| varint_len(v as i64 as u64)).sum();
    encode_varint(body as u64, buf);
    for &value in values {
        encode_varint(value as i64 as u64, buf);
    }
}

pub fn len_packed_int32(field: u32, values: &[i32]) -> usize {
    if values.is_empty() {
        return 0;
    }
    let body: usize = values.iter().map(|&v| varint_len(v as i64 as u64)).sum();
    key_len(field) + varint_len(body as u64) + body
}

pub fn merge_repeated_int32(
    wire_type: WireType,
    values: &mut Vec<i32>,
    buf: &mut impl Buf,
) -> XtraceResult<()> {
    merge_repeated_varint(wire_type, buf, |raw| values.push(raw as i32))
}

pub fn emit_packed_bool(field: u32, values: &[bool], buf: &mut impl BufMut) {
    if values.is_empty() {
        return;
    }
    encode_key(field, WireType::LengthDelimited, buf);
    encode_varint(values.len() as u64, buf);
    for &value in values {
        buf.put_u8(value as u8);
    }
}

pub fn len_packed_bool(field: u32, values: &[bool]) -> usize {
    if values.is_empty() {
        return 0;
    }
    key_len(field) + varint_len(values.len() as u64) + values.len()
}

pub fn merge_repeated_bool(
    wire_type: WireType,
    values: &mut Vec<bool>,
    buf: &mut impl Buf,
) -> XtraceResult<()> {
    merge_repeated_varint(wire_type, buf, |raw| values.push(raw != 0))
}

fn merge_repeated_varint(
    wire_type: WireType,
    buf: &mut impl Buf,
    mut push: impl FnMut(u64),
) -> XtraceResult<()> {
    match wire_type {
        WireType::Varint => {
            push(decode_varint(buf)?);
            Ok(())
        }
        WireType::LengthDelimited => {
            let len = delimited_len(wire_type, buf)?;
            let limit = buf.remaining() - len;
            while buf.remaining() > limit {
                push(decode_varint(buf)?);
            }
            ensure!(buf.remaining() == limit, "packed varint run overran its length prefix");
            Ok(())
        }
        other => bail!("expected a varint or packed payload, got {:?}", other),
    }
}

pub fn emit_packed_float(field: u32, values: &[f32], buf: &mut impl BufMut) {
    if values.is_empty() {
        return;
    }
    encode_key(field, WireType::LengthDelimited, buf);
    encode_varint(4 * values.len() as u64, buf);
    for &value in values {
        buf.put_f32_le(value);
    }
}

pub fn len_packed_float(field: u32, values: &[f32]) -> usize {
    if values.is_empty() {
        return 0;
    }
    key_len(field) + varint_len(4 * values.len() as u64) + 4 * values.len()
}

pub fn merge_repeated_float(
    wire_type: WireType,
    values: &mut Vec<f32>,
    buf: &mut impl Buf,
) -> XtraceResult<()> {
    match wire_type {
        WireType::Fixed32 => {
            values.push(read_float(wire_type, buf)?);
            Ok(())
        }
        WireType::LengthDelimited => {
            let len = delimited_len(wire_type, buf)?;
            ensure!(len % 4 == 0, "packed float run of {} bytes is not a multiple of 4", len);
            for _ in 0..len / 4 {
                values.push(f32::from_bits(buf.get_u32_le()));
            }
            Ok(())
        }
        other => bail!("expected a fixed32 or packed payload, got {:?}", other),
    }
}

// --- maps ---
//
// A map field is a repeated entry message: key = field 1, value = field 2.
// Default keys and values are omitted on encode and materialized on decode.

pub fn emit_map_i64_message<M: Message + PartialEq>(
    field: u32,
    map: &HashMap<i64, M>,
    buf: &mut impl BufMut,
) {
    let empty = M::default();
    for (&key, value) in map {
        let mut entry = 0;
        if key != 0 {
            entry += len_int64(1, key);
        }
        if *value != empty {
            entry += len_message(2, value);
        }
        encode_key(field, WireType::LengthDelimited, buf);
        encode_varint(entry as u64, buf);
        if key != 0 {
            emit_int64(1, key, buf);
        }
        if *value != empty {
            emit_message(2, value, buf);
        }
    }
}

pub fn len_map_i64_message<M: Message + PartialEq>(field: u32, map: &HashMap<i64, M>) -> usize {
    let empty = M::default();
    map.iter()
        .map(|(&key, value)| {
            let mut entry = 0;
            if key != 0 {
                entry += len_int64(1, key);
            }
            if *value != empty {
                entry += len_message(2, value);
            }
            key_len(field) + varint_len(entry as u64) + entry
        })
        .sum()
}

pub fn merge_map_i64_message<M: Message>(
    wire_type: WireType,
    map: &mut HashMap<i64, M>,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> XtraceResult<()> {
    let len = delimited_len(wire_type, buf)?;
    let ctx = ctx.enter()?;
    let limit = buf.remaining() - len;
    let mut key = 0i64;
    let mut value = M::default();
    while buf.remaining() > limit {
        let (field, wire_type) = decode_key(buf)?;
        match field {
            1 => key = read_int64(wire_type, buf)?,
            2 => merge_message(wire_type, &mut value, buf, ctx.clone())?,
            _ => skip_field(field, wire_type, buf, ctx.clone())?,
        }
    }
    ensure!(buf.remaining() == limit, "map entry overran its length prefix");
    map.insert(key, value);
    Ok(())
}

pub fn emit_map_string_message<M: Message + PartialEq>(
    field: u32,
    map: &HashMap<String, M>,
    buf: &mut impl BufMut,
) {
    let empty = M::default();
    for (key, value) in map {
        let mut entry = 0;
        if !key.is_empty() {
            entry += len_string(1, key);
        }
        if *value != empty {
            entry += len_message(2, value);
        }
        encode_key(field, WireType::LengthDelimited, buf);
        encode_varint(entry as u64, buf);
        if !key.is_empty() {
            emit_string(1, key, buf);
        }
        if *value != empty {
            emit_message(2, value, buf);
        }
    }
}

pub fn len_map_string_message<M: Message + PartialEq>(
    field: u32,
    map: &HashMap<String, M>,
) -> usize {
    let empty = M::default();
    map.iter()
        .map(|(key, value)| {
            let mut entry = 0;
            if !key.is_empty() {
                entry += len_string(1, key);
            }
            if *value != empty {
                entry += len_message(2, value);
            }
            key_len(field) + varint_len(entry as u64) + entry
        })
        .sum()
}

pub fn merge_map_string_message<M: Message>(
    wire_type: WireType,
    map: &mut HashMap<String, M>,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> XtraceResult<()> {
    let len = delimited_len(wire_type, buf)?;
    let ctx = ctx.enter()?;
    let limit = buf.remaining() - len;
    let mut key = String::new();
    let mut value = M::default();
    while buf.remaining() > limit {
        let (field, wire_type) = decode_key(buf)?;
        match field {
            1 => key = read_string(wire_type, buf)?,
            2 => merge_message(wire_type, &mut value, buf, ctx.clone())?,
            _ => skip_field(field, wire_type, buf, ctx.clone())?,
        }
    }
    ensure!(buf.remaining() == limit, "map entry overran its length prefix");
    map.insert(key, value);
    Ok(())
}

// --- unknown fields ---

/// Discard one field payload of any wire type, recursing through balanced
/// group markers. Meeting an end-group here means the enclosing scope never
/// opened one, which is an error.
pub fn skip_field(
    field: u32,
    wire_type: WireType,
    buf: &mut impl Buf,
    ctx: DecodeContext,
) -> XtraceResult<()> {
    match wire_type {
        WireType::Varint => {
            decode_varint(buf)?;
        }
        WireType::Fixed64 => {
            ensure!(buf.remaining() >= 8, "truncated fixed64 payload");
            buf.advance(8);
        }
        WireType::Fixed32 => {
            ensure!(buf.remaining() >= 4, "truncated fixed32 payload");
            buf.advance(4);
        }
        WireType::LengthDelimited => {
            let len = delimited_len(wire_type, buf)?;
            buf.advance(len);
        }
        WireType::StartGroup => {
            let ctx = ctx.enter()?;
            loop {
                let (inner, wire_type) = decode_key(buf)?;
                if wire_type == WireType::EndGroup {
                    ensure!(
                        inner == field,
                        "group {} closed by end marker of group {}",
                        field,
                        inner
                    );
                    break;
                }
                skip_field(inner, wire_type, buf, ctx.clone())?;
            }
        }
        WireType::EndGroup => bail!("stray end-group marker for field {}", field),
    }
    Ok(())
}
