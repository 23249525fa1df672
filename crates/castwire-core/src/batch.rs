//! Batch (Response) decoding: the ordered inner messages of one frame.

use bytes::Bytes;

use crate::error::Result;
use crate::wire::{Cursor, WIRE_LEN, WIRE_VARINT};

/// One named event payload. Owned by its [`Response`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InnerMessage {
    pub method: String,
    pub payload: Bytes,
    pub msg_id: String,
    pub msg_type: i32,
    pub offset: String,
    pub need_wrds_store: bool,
    pub wrds_version: String,
    pub wrds_sub_key: String,
}

/// Decoded batch. `messages` keeps wire order.
///
/// The continuation fields are surfaced for the transport layer; the decoder
/// only reads `now`, which becomes the record timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub messages: Vec<InnerMessage>,
    pub cursor: String,
    pub fetch_interval: String,
    /// Server clock, milliseconds since the epoch.
    pub now: String,
    pub internal_ext: String,
    pub fetch_type: i32,
    pub heartbeat_duration: String,
    pub need_ack: bool,
    pub push_server: String,
    pub live_cursor: String,
    pub history_no_more: bool,
    /// Set when the scan stopped on a read failure.
    pub truncated: bool,
}

/// Decode a batch. Never fails: a read failure ends the scan and whatever was
/// collected (possibly nothing) is returned with `truncated` set.
pub fn decode_response(data: &[u8]) -> Response {
    let mut cur = Cursor::new(data);
    let mut resp = Response::default();
    if let Err(e) = scan_response(&mut cur, &mut resp) {
        tracing::debug!(
            error = %e,
            offset = cur.offset(),
            kept = resp.messages.len(),
            "response scan stopped early"
        );
        resp.truncated = true;
    }
    resp
}

fn scan_response(cur: &mut Cursor<'_>, resp: &mut Response) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => {
                let msg = cur.nested(decode_inner_message)?;
                resp.messages.push(msg);
            }
            (2, WIRE_LEN) => resp.cursor = cur.read_len_string()?,
            (3, WIRE_VARINT) => resp.fetch_interval = cur.read_varint64(false)?,
            (4, WIRE_VARINT) => resp.now = cur.read_varint64(false)?,
            (5, WIRE_LEN) => resp.internal_ext = cur.read_len_string()?,
            (6, WIRE_VARINT) => resp.fetch_type = cur.read_varint32()?,
            (8, WIRE_VARINT) => resp.heartbeat_duration = cur.read_varint64(true)?,
            (9, WIRE_VARINT) => resp.need_ack = cur.read_varint32()? != 0,
            (10, WIRE_LEN) => resp.push_server = cur.read_len_string()?,
            (11, WIRE_LEN) => resp.live_cursor = cur.read_len_string()?,
            (12, WIRE_VARINT) => resp.history_no_more = cur.read_varint32()? != 0,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

fn decode_inner_message(cur: &mut Cursor<'_>) -> InnerMessage {
    let mut msg = InnerMessage::default();
    if let Err(e) = scan_inner_message(cur, &mut msg) {
        tracing::debug!(error = %e, method = %msg.method, "inner message truncated");
    }
    msg
}

fn scan_inner_message(cur: &mut Cursor<'_>, msg: &mut InnerMessage) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => msg.method = cur.read_len_string()?,
            (2, WIRE_LEN) => {
                let len = cur.read_length()?;
                msg.payload = Bytes::copy_from_slice(cur.read_bytes(len)?);
            }
            (3, WIRE_VARINT) => msg.msg_id = cur.read_varint64(false)?,
            (4, WIRE_VARINT) => msg.msg_type = cur.read_varint32()?,
            (5, WIRE_VARINT) => msg.offset = cur.read_varint64(false)?,
            (6, WIRE_VARINT) => msg.need_wrds_store = cur.read_varint32()? != 0,
            (7, WIRE_VARINT) => msg.wrds_version = cur.read_varint64(false)?,
            (8, WIRE_LEN) => msg.wrds_sub_key = cur.read_len_string()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}
