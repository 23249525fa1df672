//! Base-128 varint decoding.
//!
//! varint32 is lenient: groups keep being consumed until the continuation
//! bit clears, and anything above bit 31 is dropped (two's-complement
//! wraparound). varint64 values leave this module as decimal strings so the
//! full 64-bit range survives consumers without native 64-bit integers.

use crate::error::Result;
use crate::wire::cursor::Cursor;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7F;

/// Groups that contribute to a varint64.
const MAX_VARINT64_GROUPS: u32 = 10;

impl<'a> Cursor<'a> {
    pub fn read_varint32(&mut self) -> Result<i32> {
        let mut value: u32 = 0;
        let mut shift: u32 = 0;
        loop {
            let b = self.read_byte()?;
            if shift < 32 {
                value |= u32::from(b & PAYLOAD) << shift;
            }
            shift = shift.saturating_add(7);
            if b & CONTINUATION == 0 {
                return Ok(value as i32);
            }
        }
    }

    /// Decode a varint64 into its low and high 32-bit halves.
    pub fn read_varint64_parts(&mut self) -> Result<(u32, u32)> {
        // part0: groups 0..4, part1: groups 4..8, part2: groups 8..10
        let mut parts = [0u32; 3];
        let mut groups = 0u32;
        loop {
            let b = self.read_byte()?;
            if groups < MAX_VARINT64_GROUPS {
                let slot = (groups / 4) as usize;
                let shift = (groups % 4) * 7;
                if let Some(part) = parts.get_mut(slot) {
                    *part |= u32::from(b & PAYLOAD) << shift;
                }
            }
            groups += 1;
            if b & CONTINUATION == 0 {
                break;
            }
        }
        let [part0, part1, part2] = parts;
        let low = part0 | (part1 << 28);
        let high = (part1 >> 4) | (part2 << 24);
        Ok((low, high))
    }

    /// Decode a varint64 as a base-10 string.
    ///
    /// With `unsigned == false` the value is read as two's-complement int64.
    pub fn read_varint64(&mut self, unsigned: bool) -> Result<String> {
        let (low, high) = self.read_varint64_parts()?;
        Ok(format_halves(low, high, unsigned))
    }
}

/// Rebuild `high * 2^32 + low` and render it in base 10.
pub fn format_halves(low: u32, high: u32, unsigned: bool) -> String {
    let magnitude = (u64::from(high) << 32) | u64::from(low);
    if unsigned {
        magnitude.to_string()
    } else {
        (magnitude as i64).to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn v32(bytes: &[u8]) -> i32 {
        Cursor::new(bytes).read_varint32().unwrap()
    }

    fn v64(bytes: &[u8], unsigned: bool) -> String {
        Cursor::new(bytes).read_varint64(unsigned).unwrap()
    }

    #[test]
    fn varint32_basic() {
        assert_eq!(v32(&[0x00]), 0);
        assert_eq!(v32(&[0x01]), 1);
        assert_eq!(v32(&[0xAC, 0x02]), 300);
        assert_eq!(v32(&[0xFF, 0xFF, 0xFF, 0xFF, 0x07]), i32::MAX);
        assert_eq!(v32(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]), -1);
    }

    #[test]
    fn varint32_overlong_is_tolerated() {
        // ten-group encoding of -1 as emitted for negative int32 fields
        let data = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x2A];
        let mut c = Cursor::new(&data);
        assert_eq!(c.read_varint32().unwrap(), -1);
        assert_eq!(c.read_byte().unwrap(), 0x2A);
        // padded zero groups
        assert_eq!(v32(&[0x81, 0x80, 0x80, 0x80, 0x80, 0x00]), 1);
    }

    #[test]
    fn varint32_truncated() {
        let err = Cursor::new(&[0x80, 0x80]).read_varint32().unwrap_err();
        assert_eq!(err.code().as_str(), "TRUNCATED_BUFFER");
    }

    #[test]
    fn varint64_extremes() {
        assert_eq!(v64(&[0x00], true), "0");
        assert_eq!(
            v64(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F], true),
            "4294967295"
        );
        assert_eq!(
            v64(&[0x80, 0x80, 0x80, 0x80, 0x10], true),
            "4294967296"
        );
        let max = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
        assert_eq!(v64(&max, true), u64::MAX.to_string());
        assert_eq!(v64(&max, false), "-1");
    }

    #[test]
    fn varint64_truncated_fails() {
        let err = Cursor::new(&[0xFF, 0xFF]).read_varint64(true).unwrap_err();
        assert_eq!(err.code().as_str(), "TRUNCATED_BUFFER");
    }
}
