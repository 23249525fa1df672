//! castwire core: schema-less decoder for a live-stream event feed.
//!
//! A frame travels as base64 text. Inside is a PushFrame envelope whose
//! payload (usually gzip) is a batch of named inner messages. Each inner
//! message is decoded by a per-type decoder chosen from a static table and
//! projected into an ordered, string-keyed [`EventRecord`].
//!
//! The crate does no I/O and keeps no state between calls; statistics are
//! returned with every result.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed input
//! surfaces as [`CastwireError`] at the envelope level and as partial results
//! (`truncated` / `partial`) below it.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod batch;
pub mod compress;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod message;
pub mod options;
pub mod record;
pub mod stats;
pub mod wire;

pub use decode::{decode_base64, decode_bytes, DecodeOutput};
pub use dispatch::{decode_inner, Dispatched};
pub use error::{CastwireError, ErrorCode, Result};
pub use frame::{PayloadState, PushFrame};
pub use message::LiveEvent;
pub use options::DecodeOptions;
pub use record::EventRecord;
pub use stats::DecodeStats;
