//! Lenient UTF-8 decoding.
//!
//! A byte-level state machine that never fails: every ill-formed subsequence
//! becomes one U+FFFD (maximal-subpart substitution), and decoding resumes at
//! the first byte that could not continue the sequence.

use crate::error::Result;
use crate::wire::cursor::Cursor;

pub const REPLACEMENT: char = '\u{FFFD}';

#[derive(Debug, Clone, Copy)]
struct Pending {
    codepoint: u32,
    needed: u8,
    lower: u8,
    upper: u8,
}

impl Pending {
    fn start(lead: u8) -> Option<Self> {
        let (codepoint, needed, lower, upper) = match lead {
            0xC2..=0xDF => (u32::from(lead & 0x1F), 1, 0x80, 0xBF),
            0xE0 => (u32::from(lead & 0x0F), 2, 0xA0, 0xBF),
            0xED => (u32::from(lead & 0x0F), 2, 0x80, 0x9F),
            0xE1..=0xEF => (u32::from(lead & 0x0F), 2, 0x80, 0xBF),
            0xF0 => (u32::from(lead & 0x07), 3, 0x90, 0xBF),
            0xF4 => (u32::from(lead & 0x07), 3, 0x80, 0x8F),
            0xF1..=0xF3 => (u32::from(lead & 0x07), 3, 0x80, 0xBF),
            _ => return None,
        };
        Some(Self {
            codepoint,
            needed,
            lower,
            upper,
        })
    }
}

/// Decode `bytes`, substituting U+FFFD for malformed sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut pending: Option<Pending> = None;
    let mut i = 0usize;

    while let Some(&b) = bytes.get(i) {
        match pending {
            None => {
                if b < 0x80 {
                    out.push(char::from(b));
                } else {
                    pending = Pending::start(b);
                    if pending.is_none() {
                        out.push(REPLACEMENT);
                    }
                }
                i += 1;
            }
            Some(mut p) => {
                if !(p.lower..=p.upper).contains(&b) {
                    // Sequence broken: emit one replacement and re-read `b`
                    // as a fresh lead byte.
                    out.push(REPLACEMENT);
                    pending = None;
                    continue;
                }
                p.codepoint = (p.codepoint << 6) | u32::from(b & 0x3F);
                p.needed -= 1;
                p.lower = 0x80;
                p.upper = 0xBF;
                i += 1;
                if p.needed == 0 {
                    out.push(char::from_u32(p.codepoint).unwrap_or(REPLACEMENT));
                    pending = None;
                } else {
                    pending = Some(p);
                }
            }
        }
    }

    if pending.is_some() {
        out.push(REPLACEMENT);
    }
    out
}

impl<'a> Cursor<'a> {
    /// Read `len` bytes and decode them leniently.
    pub fn read_string(&mut self, len: usize) -> Result<String> {
        self.read_bytes(len).map(decode_lossy)
    }

    /// Read a length-prefixed string field.
    pub fn read_len_string(&mut self) -> Result<String> {
        let len = self.read_length()?;
        self.read_string(len)
    }
}
