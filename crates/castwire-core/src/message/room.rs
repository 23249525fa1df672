//! Room-level messages: viewer counts, stats banners, control and status.

use crate::error::Result;
use crate::message::{decode_with, skip_common, Decoded};
use crate::wire::{Cursor, WIRE_LEN, WIRE_VARINT};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomUserSeqMessage {
    pub total: String,
    pub total_user: String,
    pub total_pv_for_anchor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomStatsMessage {
    pub display_short: String,
    pub display_middle: String,
    pub display_long: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlMessage {
    pub action: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomMessage {
    pub content: String,
    /// 1 = live started, 2 = live ended.
    pub room_status: i32,
}

/// `WebcastRoomUserSeqMessage`: 2 total, 3 total user, 4 total pv for anchor.
pub fn decode_room_user_seq(payload: &[u8]) -> Decoded<RoomUserSeqMessage> {
    decode_with(&mut Cursor::new(payload), "viewer_count", scan_room_user_seq)
}

fn scan_room_user_seq(cur: &mut Cursor<'_>, out: &mut Decoded<RoomUserSeqMessage>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        let msg = &mut out.value;
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_VARINT) => msg.total = cur.read_varint64(true)?,
            (3, WIRE_VARINT) => msg.total_user = cur.read_varint64(true)?,
            (4, WIRE_VARINT) => msg.total_pv_for_anchor = cur.read_varint64(true)?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// `WebcastRoomStatsMessage`: 2 short, 3 middle, 4 long display strings.
pub fn decode_room_stats(payload: &[u8]) -> Decoded<RoomStatsMessage> {
    decode_with(&mut Cursor::new(payload), "room_stats", scan_room_stats)
}

fn scan_room_stats(cur: &mut Cursor<'_>, out: &mut Decoded<RoomStatsMessage>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        let msg = &mut out.value;
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_LEN) => msg.display_short = cur.read_len_string()?,
            (3, WIRE_LEN) => msg.display_middle = cur.read_len_string()?,
            (4, WIRE_LEN) => msg.display_long = cur.read_len_string()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// `WebcastControlMessage`: 2 action.
pub fn decode_control(payload: &[u8]) -> Decoded<ControlMessage> {
    decode_with(&mut Cursor::new(payload), "control", scan_control)
}

fn scan_control(cur: &mut Cursor<'_>, out: &mut Decoded<ControlMessage>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_VARINT) => out.value.action = cur.read_varint32()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// `WebcastRoomMessage`: 2 content, 3 room status.
pub fn decode_room(payload: &[u8]) -> Decoded<RoomMessage> {
    decode_with(&mut Cursor::new(payload), "room", scan_room)
}

fn scan_room(cur: &mut Cursor<'_>, out: &mut Decoded<RoomMessage>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        let msg = &mut out.value;
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_LEN) => msg.content = cur.read_len_string()?,
            (3, WIRE_VARINT) => msg.room_status = cur.read_varint32()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}
