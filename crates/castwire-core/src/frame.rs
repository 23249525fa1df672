//! Outer envelope (PushFrame) decoding and payload inflation.

use std::collections::HashMap;

use bytes::Bytes;

use crate::compress;
use crate::error::{CastwireError, Result};
use crate::options::DecodeOptions;
use crate::wire::{Cursor, WIRE_LEN, WIRE_VARINT};

/// Header that declares payload compression.
pub const COMPRESS_HEADER: &str = "compress_type";
/// Only compression the feed uses.
pub const GZIP: &str = "gzip";

/// Decoded outer frame. Immutable once decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushFrame {
    pub seq_id: String,
    pub log_id: String,
    pub service: String,
    pub method: String,
    /// Unique keys; later entries overwrite earlier ones.
    pub headers: HashMap<String, String>,
    pub payload_encoding: String,
    pub payload_type: String,
    /// Owned copy, independent of the input buffer.
    pub payload: Bytes,
    pub log_id_new: String,
}

impl PushFrame {
    /// True when the frame declares a gzip payload (exact, case-sensitive).
    pub fn declares_gzip(&self) -> bool {
        self.headers.get(COMPRESS_HEADER).map(String::as_str) == Some(GZIP)
            || self.payload_encoding == GZIP
    }
}

/// What happened to the envelope payload after decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadState {
    /// No compression declared; payload used as-is.
    Plain,
    /// Declared gzip and inflated.
    Inflated,
    /// Declared gzip but inflation failed; the raw bytes were kept.
    Undecompressable(String),
}

/// Envelope plus the payload that the batch decoder should read.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub frame: PushFrame,
    pub body: Bytes,
    pub payload_state: PayloadState,
}

/// Decode a PushFrame. Field-level read failures stop the scan and keep what
/// was read; a frame that never produced a payload is malformed.
pub fn decode_push_frame(data: &[u8]) -> Result<PushFrame> {
    let mut cur = Cursor::new(data);
    let mut frame = PushFrame::default();
    let mut saw_payload = false;

    if let Err(e) = scan_push_frame(&mut cur, &mut frame, &mut saw_payload) {
        tracing::debug!(error = %e, offset = cur.offset(), "push frame scan stopped early");
    }

    if !saw_payload {
        return Err(CastwireError::MalformedEnvelope(
            "push frame carries no payload field".into(),
        ));
    }
    Ok(frame)
}

fn scan_push_frame(
    cur: &mut Cursor<'_>,
    frame: &mut PushFrame,
    saw_payload: &mut bool,
) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_VARINT) => frame.seq_id = cur.read_varint64(true)?,
            (2, WIRE_VARINT) => frame.log_id = cur.read_varint64(true)?,
            (3, WIRE_VARINT) => frame.service = cur.read_varint64(true)?,
            (4, WIRE_VARINT) => frame.method = cur.read_varint64(true)?,
            (5, WIRE_LEN) => {
                if let Some((key, value)) = cur.nested(decode_header_entry)? {
                    frame.headers.insert(key, value);
                }
            }
            (6, WIRE_LEN) => frame.payload_encoding = cur.read_len_string()?,
            (7, WIRE_LEN) => frame.payload_type = cur.read_len_string()?,
            (8, WIRE_LEN) => {
                let len = cur.read_length()?;
                frame.payload = Bytes::copy_from_slice(cur.read_bytes(len)?);
                *saw_payload = true;
            }
            (9, WIRE_LEN) => frame.log_id_new = cur.read_len_string()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// One `map<string, string>` entry. Empty keys or values are dropped.
fn decode_header_entry(cur: &mut Cursor<'_>) -> Option<(String, String)> {
    let mut key = String::new();
    let mut value = String::new();
    if let Err(e) = scan_header_entry(cur, &mut key, &mut value) {
        tracing::debug!(error = %e, "header entry truncated");
    }
    (!key.is_empty() && !value.is_empty()).then_some((key, value))
}

fn scan_header_entry(cur: &mut Cursor<'_>, key: &mut String, value: &mut String) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => *key = cur.read_len_string()?,
            (2, WIRE_LEN) => *value = cur.read_len_string()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// Decode the envelope and inflate its payload when gzip is declared.
///
/// Inflation failure is not an error: the raw payload is returned and the
/// failure is reported through [`PayloadState::Undecompressable`].
pub fn decode_envelope(data: &[u8], opts: &DecodeOptions) -> Result<Envelope> {
    let frame = decode_push_frame(data)?;

    if !frame.declares_gzip() {
        let body = frame.payload.clone();
        return Ok(Envelope {
            frame,
            body,
            payload_state: PayloadState::Plain,
        });
    }

    match compress::gunzip(&frame.payload, opts.max_decompressed_bytes) {
        Ok(inflated) => Ok(Envelope {
            frame,
            body: Bytes::from(inflated),
            payload_state: PayloadState::Inflated,
        }),
        Err(e) => {
            tracing::warn!(
                error = %e,
                payload_len = frame.payload.len(),
                "gzip payload could not be inflated; keeping raw bytes"
            );
            let body = frame.payload.clone();
            Ok(Envelope {
                frame,
                body,
                payload_state: PayloadState::Undecompressable(e.to_string()),
            })
        }
    }
}
