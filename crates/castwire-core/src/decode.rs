//! Top-level entry points: one frame in, records and statistics out.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;

use crate::batch::decode_response;
use crate::dispatch::decode_inner;
use crate::error::{CastwireError, Result};
use crate::frame::{decode_envelope, PayloadState, PushFrame};
use crate::message::LiveEvent;
use crate::options::DecodeOptions;
use crate::record::{project, EventRecord};
use crate::stats::DecodeStats;

/// Everything one decode call produces. Owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOutput {
    pub frame: PushFrame,
    pub payload_state: PayloadState,
    /// One record per named inner message, in wire order. Messages with an
    /// empty method are counted in `stats.skipped` and produce no record.
    pub records: Vec<EventRecord>,
    /// Typed events, parallel to `records`.
    pub events: Vec<LiveEvent>,
    /// Batch server clock used as the record timestamp.
    pub timestamp: String,
    /// The batch scan stopped early; `records` holds what was read.
    pub truncated: bool,
    pub stats: DecodeStats,
}

/// Decode one base64 frame as received from the feed.
///
/// Surrounding whitespace is ignored; padded and unpadded input are both
/// accepted.
pub fn decode_base64(input: &str, opts: &DecodeOptions) -> Result<DecodeOutput> {
    let raw = base64_to_bytes(input)?;
    decode_bytes(&raw, opts)
}

/// Decode one raw (already base64-decoded) frame.
pub fn decode_bytes(raw: &[u8], opts: &DecodeOptions) -> Result<DecodeOutput> {
    let envelope = decode_envelope(raw, opts)?;
    let response = decode_response(&envelope.body);

    let mut stats = DecodeStats {
        frames: 1,
        ..DecodeStats::default()
    };
    if matches!(envelope.payload_state, PayloadState::Undecompressable(_)) {
        stats.inflate_failures += 1;
    }

    let mut records = Vec::with_capacity(response.messages.len());
    let mut events = Vec::with_capacity(response.messages.len());
    for msg in &response.messages {
        if msg.method.is_empty() {
            tracing::debug!(
                payload_len = msg.payload.len(),
                "inner message without method skipped"
            );
            stats.skipped += 1;
            continue;
        }
        let dispatched = decode_inner(msg, opts);
        stats.record(&dispatched.event, dispatched.partial);
        if dispatched.inflate_failed {
            stats.inflate_failures += 1;
        }
        records.push(project(&dispatched, &response.now, opts));
        events.push(dispatched.event);
    }

    tracing::debug!(
        seq_id = %envelope.frame.seq_id,
        messages = records.len(),
        unknown = stats.unknown,
        skipped = stats.skipped,
        partial = stats.partial,
        truncated = response.truncated,
        "batch decoded"
    );

    Ok(DecodeOutput {
        frame: envelope.frame,
        payload_state: envelope.payload_state,
        records,
        events,
        timestamp: response.now,
        truncated: response.truncated,
        stats,
    })
}

fn base64_to_bytes(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    STANDARD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| CastwireError::Base64Decode(e.to_string()))
}
