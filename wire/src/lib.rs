//! # xtrace wire format
//!
//! Foundation crate of the xtrace workspace: the Protocol Buffers binary wire
//! encoding, written against [`bytes::Buf`] and [`bytes::BufMut`] so that the
//! message crates can encode and decode over any buffer shape.
//!
//! A field on the wire is a key varint `(field_number << 3) | wire_type`
//! followed by a payload whose form the wire type dictates. [`Message`] is the
//! contract the hand-written message types implement on top of the helpers in
//! [`fields`]: exact [`Message::encoded_len`], field-number-ordered
//! [`Message::encode_raw`], and a per-field merge for decoding that skips
//! whatever it does not know about.

pub mod fields;
pub mod key;
pub mod message;
pub mod varint;

pub use crate::key::{MAX_FIELD, WireType, decode_key, encode_key, key_len};
pub use crate::message::{DecodeContext, Message, RECURSION_LIMIT};
pub use crate::varint::{decode_varint, encode_varint, varint_len, zigzag_decode, zigzag_encode};

pub use anyhow;
pub type XtraceError = anyhow::Error;
pub type XtraceResult<T> = anyhow::Result<T>;

/// Everything a `Message` implementation needs in scope.
pub mod internal {
    pub use crate::fields::*;
    pub use crate::key::{MAX_FIELD, WireType, decode_key, encode_key, key_len};
    pub use crate::message::{DecodeContext, Message, RECURSION_LIMIT};
    pub use crate::varint::{
        decode_varint, encode_varint, varint_len, zigzag_decode, zigzag_encode,
    };
    pub use crate::{XtraceError, XtraceResult};
    pub use anyhow::{Context, anyhow, bail, ensure, format_err};
    pub use bytes::{Buf, BufMut};
}

pub mod prelude {
    pub use crate::message::Message;
    pub use crate::{XtraceError, XtraceResult};
}
