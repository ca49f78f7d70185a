//! The contract hand-written message types implement, plus the depth guard
//! threaded through nested decoding.

use anyhow::{Context, ensure};
use bytes::{Buf, BufMut};

use crate::XtraceResult;
use crate::key::{WireType, decode_key};

/// Decoding refuses messages nested deeper than this, so hostile input
/// degenerates into an error instead of a blown stack.
pub const RECURSION_LIMIT: u32 = 100;

#[derive(Clone, Debug, Default)]
pub struct DecodeContext {
    depth: u32,
}

impl DecodeContext {
    /// One level down. Fails past [`RECURSION_LIMIT`].
    pub fn enter(&self) -> XtraceResult<DecodeContext> {
        ensure!(
            self.depth < RECURSION_LIMIT,
            "message nesting runs over {} levels",
            RECURSION_LIMIT
        );
        Ok(DecodeContext { depth: self.depth + 1 })
    }
}

/// A message that knows how to put itself on the wire and back.
///
/// Implementations provide the three schema-specific methods; everything else
/// is derived from them. `encode_raw` must emit fields in field number order
/// and skip fields holding their default value, and `encoded_len` must match
/// its output byte for byte, as nested length prefixes are computed from it.
pub trait Message: Default {
    /// Append every non-default field. Panics if `buf` runs out of space,
    /// use [`Message::encode`] for a checked variant.
    fn encode_raw<B: BufMut>(&self, buf: &mut B);

    /// Exact size of the `encode_raw` output.
    fn encoded_len(&self) -> usize;

    /// Consume one field payload, merging it into `self`, or skip it when the
    /// field number is unknown.
    fn merge_field<B: Buf>(
        &mut self,
        field: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> XtraceResult<()>;

    fn encode<B: BufMut>(&self, buf: &mut B) -> XtraceResult<()> {
        let required = self.encoded_len();
        ensure!(
            buf.remaining_mut() >= required,
            "message needs {} bytes, buffer has room for {}",
            required,
            buf.remaining_mut()
        );
        self.encode_raw(buf);
        Ok(())
    }

    fn encode_to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_raw(&mut buf);
        buf
    }

    fn write_to<W: std::io::Write>(&self, w: &mut W) -> XtraceResult<()> {
        w.write_all(&self.encode_to_vec())?;
        Ok(())
    }

    fn decode<B: Buf>(mut buf: B) -> XtraceResult<Self> {
        let mut message = Self::default();
        message.merge(&mut buf)?;
        Ok(message)
    }

    /// Run the key/payload loop over the whole buffer, merging into `self`.
    fn merge<B: Buf>(&mut self, buf: &mut B) -> XtraceResult<()> {
        let ctx = DecodeContext::default();
        while buf.has_remaining() {
            let (field, wire_type) = decode_key(buf)?;
            self.merge_field(field, wire_type, buf, ctx.clone())
                .with_context(|| format!("decoding field {field}"))?;
        }
        Ok(())
    }
}
