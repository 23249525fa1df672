//! Bounds-checked forward-only reader with a narrowable read limit.
//!
//! Parsing rules:
//! - `0 <= offset <= limit <= buf.len()` holds after every call.
//! - Every read goes through [`Cursor::advance`]; nothing indexes the buffer
//!   without a prior bounds check.
//! - Nested sub-messages narrow `limit` and restore it afterwards (stack
//!   discipline), so a sub-decoder can never see sibling bytes.

use crate::error::{CastwireError, Result};

/// Protobuf wire type: varint.
pub const WIRE_VARINT: u32 = 0;
/// Protobuf wire type: fixed 64-bit.
pub const WIRE_FIXED64: u32 = 1;
/// Protobuf wire type: length-delimited.
pub const WIRE_LEN: u32 = 2;
/// Protobuf wire type: start group (legacy).
pub const WIRE_START_GROUP: u32 = 3;
/// Protobuf wire type: end group (legacy).
pub const WIRE_END_GROUP: u32 = 4;
/// Protobuf wire type: fixed 32-bit.
pub const WIRE_FIXED32: u32 = 5;

/// Limit saved by [`Cursor::push_temporary_limit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitFrame {
    /// Length prefix read from the wire.
    pub declared_len: usize,
    /// Limit in force before the push.
    pub previous_limit: usize,
}

/// Field tag split into number and wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub field: u32,
    pub wire_type: u32,
}

/// Reader over a single shared backing buffer.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    offset: usize,
    limit: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            limit: buf.len(),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes left before the current limit.
    pub fn remaining(&self) -> usize {
        self.limit - self.offset
    }

    pub fn at_end(&self) -> bool {
        self.offset == self.limit
    }

    /// Move forward `n` bytes, returning the offset the move started at.
    pub fn advance(&mut self, n: usize) -> Result<usize> {
        let start = self.offset;
        match start.checked_add(n) {
            Some(end) if end <= self.limit => {
                self.offset = end;
                Ok(start)
            }
            _ => Err(CastwireError::TruncatedBuffer {
                needed: n,
                available: self.remaining(),
            }),
        }
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let at = self.advance(1)?;
        self.buf
            .get(at)
            .copied()
            .ok_or(CastwireError::TruncatedBuffer {
                needed: 1,
                available: 0,
            })
    }

    /// Borrow the next `n` bytes from the backing buffer.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let at = self.advance(n)?;
        let buf: &'a [u8] = self.buf;
        buf.get(at..at + n).ok_or(CastwireError::TruncatedBuffer {
            needed: n,
            available: 0,
        })
    }

    pub fn read_fixed32(&mut self) -> Result<u32> {
        let raw = self.read_bytes(4)?;
        let mut le = [0u8; 4];
        le.copy_from_slice(raw);
        Ok(u32::from_le_bytes(le))
    }

    pub fn read_fixed64(&mut self) -> Result<u64> {
        let raw = self.read_bytes(8)?;
        let mut le = [0u8; 8];
        le.copy_from_slice(raw);
        Ok(u64::from_le_bytes(le))
    }

    /// Read a field tag. `Ok(None)` means the field number was 0, which the
    /// upstream encoder uses as an end marker.
    pub fn read_tag(&mut self) -> Result<Option<Tag>> {
        let raw = self.read_varint32()? as u32;
        let field = raw >> 3;
        if field == 0 {
            return Ok(None);
        }
        Ok(Some(Tag {
            field,
            wire_type: raw & 7,
        }))
    }

    /// Read a varint32 length prefix and narrow the limit to it.
    ///
    /// The caller must hand the returned frame back to
    /// [`Cursor::restore_limit`]; prefer [`Cursor::nested`], which does so on
    /// every exit path.
    pub fn push_temporary_limit(&mut self) -> Result<LimitFrame> {
        let declared_len = self.read_length()?;
        let previous_limit = self.limit;
        self.limit = self.offset + declared_len;
        Ok(LimitFrame {
            declared_len,
            previous_limit,
        })
    }

    /// Undo a [`Cursor::push_temporary_limit`].
    ///
    /// The offset is moved to the end of the sub-message first, so bytes a
    /// sub-decoder left unread are never parsed as sibling fields.
    pub fn restore_limit(&mut self, frame: LimitFrame) {
        self.offset = self.limit;
        self.limit = frame.previous_limit;
    }

    /// Run `f` confined to the next length-delimited sub-message.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Cursor<'a>) -> T) -> Result<T> {
        let frame = self.push_temporary_limit()?;
        let out = f(self);
        self.restore_limit(frame);
        Ok(out)
    }

    /// Jump to the current limit, discarding the rest of a sub-message.
    pub fn skip_to_limit(&mut self) {
        self.offset = self.limit;
    }

    /// Skip one field of the given wire type whose tag was already read.
    pub fn skip_unknown_field(&mut self, wire_type: u32) -> Result<()> {
        match wire_type {
            WIRE_VARINT => {
                while self.read_byte()? & 0x80 != 0 {}
                Ok(())
            }
            WIRE_FIXED64 => self.advance(8).map(|_| ()),
            WIRE_LEN => {
                let len = self.read_length()?;
                self.advance(len).map(|_| ())
            }
            WIRE_START_GROUP => self.skip_group(),
            WIRE_END_GROUP => Ok(()),
            WIRE_FIXED32 => self.advance(4).map(|_| ()),
            other => Err(CastwireError::InvalidWireType(other)),
        }
    }

    /// Scan tags until the end-group tag matching an already-read start tag.
    /// Iterative so hostile nesting cannot exhaust the stack.
    fn skip_group(&mut self) -> Result<()> {
        let mut depth = 1usize;
        while !self.at_end() {
            let wire_type = (self.read_varint32()? as u32) & 7;
            match wire_type {
                WIRE_START_GROUP => depth += 1,
                WIRE_END_GROUP => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                other => self.skip_unknown_field(other)?,
            }
        }
        Err(CastwireError::TruncatedBuffer {
            needed: 1,
            available: 0,
        })
    }

    /// Read a varint32 used as a byte length and check it fits the limit.
    pub fn read_length(&mut self) -> Result<usize> {
        let raw = self.read_varint32()?;
        let remaining = self.remaining();
        match usize::try_from(raw) {
            Ok(len) if len <= remaining => Ok(len),
            _ => Err(CastwireError::LengthOverflow {
                declared: raw as u32 as usize,
                remaining,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn advance_allows_exact_limit() {
        let data = [1u8, 2, 3];
        let mut c = Cursor::new(&data);
        assert_eq!(c.advance(3).unwrap(), 0);
        assert!(c.at_end());
        let err = c.advance(1).unwrap_err();
        assert_eq!(err.code().as_str(), "TRUNCATED_BUFFER");
    }

    #[test]
    fn fixed_reads_are_little_endian() {
        let data = [0x01, 0x00, 0x00, 0x00, 0x02, 0, 0, 0, 0, 0, 0, 0x80];
        let mut c = Cursor::new(&data);
        assert_eq!(c.read_fixed32().unwrap(), 1);
        assert_eq!(c.read_fixed64().unwrap(), 0x8000_0000_0000_0002);
        assert!(c.read_byte().is_err());
    }

    #[test]
    fn nested_confines_and_restores() {
        // len=2 [0xAA 0xBB] then sibling 0xCC
        let data = [0x02, 0xAA, 0xBB, 0xCC];
        let mut c = Cursor::new(&data);
        let inner = c
            .nested(|c| {
                let a = c.read_byte().unwrap();
                // only one byte read; the second is left behind on purpose
                (a, c.remaining())
            })
            .unwrap();
        assert_eq!(inner, (0xAA, 1));
        assert_eq!(c.limit(), 4);
        assert_eq!(c.read_byte().unwrap(), 0xCC);
    }

    #[test]
    fn nested_rejects_length_past_limit() {
        let data = [0x05, 0x01];
        let mut c = Cursor::new(&data);
        let err = c.nested(|_| ()).unwrap_err();
        assert_eq!(err.code().as_str(), "LENGTH_OVERFLOW");
        assert_eq!(c.limit(), 2);
    }

    #[test]
    fn skip_each_wire_type_lands_on_next_tag() {
        // varint(300), fixed64, len(3), fixed32, then marker 0x7F
        let data = [
            0xAC, 0x02, //
            1, 2, 3, 4, 5, 6, 7, 8, //
            0x03, 9, 9, 9, //
            4, 3, 2, 1, //
            0x7F,
        ];
        let mut c = Cursor::new(&data);
        c.skip_unknown_field(WIRE_VARINT).unwrap();
        assert_eq!(c.offset(), 2);
        c.skip_unknown_field(WIRE_FIXED64).unwrap();
        assert_eq!(c.offset(), 10);
        c.skip_unknown_field(WIRE_LEN).unwrap();
        assert_eq!(c.offset(), 14);
        c.skip_unknown_field(WIRE_FIXED32).unwrap();
        assert_eq!(c.read_byte().unwrap(), 0x7F);
    }

    #[test]
    fn skip_group_handles_nesting() {
        // inside group: field 1 varint 5, nested group (field 2) with field 3
        // varint 1, end group field 2, end group field 9, then marker.
        let data = [0x08, 0x05, 0x13, 0x18, 0x01, 0x14, 0x4C, 0x7F];
        let mut c = Cursor::new(&data);
        c.skip_unknown_field(WIRE_START_GROUP).unwrap();
        assert_eq!(c.read_byte().unwrap(), 0x7F);
    }

    #[test]
    fn unterminated_group_is_truncated() {
        // Start tag already consumed; the group body ends without its end tag.
        let mut cur = Cursor::new(&[0x2B, 0x08, 0x05]);
        cur.read_tag().unwrap();
        let err = cur.skip_unknown_field(WIRE_START_GROUP).unwrap_err();
        assert!(matches!(err, CastwireError::TruncatedBuffer { .. }));

        let mut cur = Cursor::new(&[0x08, 0x05]);
        assert!(matches!(
            cur.skip_unknown_field(WIRE_START_GROUP),
            Err(CastwireError::TruncatedBuffer { .. })
        ));

        let mut cur = Cursor::new(&[]);
        assert!(cur.skip_unknown_field(WIRE_START_GROUP).is_err());
    }

    #[test]
    fn invalid_wire_type_is_reported() {
        let mut c = Cursor::new(&[0u8; 4]);
        assert_eq!(
            c.skip_unknown_field(6).unwrap_err(),
            CastwireError::InvalidWireType(6)
        );
        assert_eq!(
            c.skip_unknown_field(7).unwrap_err(),
            CastwireError::InvalidWireType(7)
        );
    }

    #[test]
    fn tag_zero_is_end_marker() {
        let mut c = Cursor::new(&[0x00, 0x0A]);
        assert_eq!(c.read_tag().unwrap(), None);
        assert_eq!(
            c.read_tag().unwrap(),
            Some(Tag {
                field: 1,
                wire_type: WIRE_LEN
            })
        );
    }
}
