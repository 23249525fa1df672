//! Schema-less protobuf wire primitives.
//!
//! Everything here operates on one backing buffer through [`Cursor`]; nested
//! messages narrow the cursor's limit instead of slicing or copying.

pub mod cursor;
pub mod utf8;
pub mod varint;

pub use cursor::{Cursor, LimitFrame, Tag};
pub use cursor::{
    WIRE_END_GROUP, WIRE_FIXED32, WIRE_FIXED64, WIRE_LEN, WIRE_START_GROUP, WIRE_VARINT,
};
pub use utf8::decode_lossy;
