//! Leaderboard updates.

use crate::error::Result;
use crate::message::{decode_with, skip_common, Decoded};
use crate::wire::{Cursor, WIRE_LEN, WIRE_VARINT};

/// Shared shape of `WebcastRankUpdateMessage` and `WebcastRoomRankMessage`:
/// 2 rank type, 3 rank entry (repeated, counted only).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankMessage {
    pub rank_type: i32,
    pub entries: u32,
}

pub fn decode_rank_update(payload: &[u8]) -> Decoded<RankMessage> {
    decode_with(&mut Cursor::new(payload), "rank_update", scan_rank)
}

pub fn decode_room_rank(payload: &[u8]) -> Decoded<RankMessage> {
    decode_with(&mut Cursor::new(payload), "room_rank", scan_rank)
}

fn scan_rank(cur: &mut Cursor<'_>, out: &mut Decoded<RankMessage>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_VARINT) => out.value.rank_type = cur.read_varint32()?,
            (3, WIRE_LEN) => {
                cur.nested(Cursor::skip_to_limit)?;
                out.value.entries += 1;
            }
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}
