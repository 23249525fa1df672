//! PK battles and link-mic (co-host) sessions.

use crate::error::Result;
use crate::message::{decode_with, skip_common, Decoded};
use crate::wire::{Cursor, WIRE_LEN, WIRE_VARINT};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchAgainstScoreMessage {
    pub match_score: String,
    pub own_score: String,
    pub against_score: String,
    /// 1 = in progress, 2 = finished.
    pub battle_status: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMicMessage {
    /// 1 = co-hosting, 2 = PK.
    pub scene: i32,
    pub mic_status: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMicBattleMessage {
    pub battle_status: i32,
    pub battle_duration: i32,
}

/// Team standings. Entries are counted, not decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMicArmiesMessage {
    pub armies: u32,
}

/// `WebcastMatchAgainstScoreMessage`: 2 match, 3 own, 4 against score, 5 status.
pub fn decode_match_against_score(payload: &[u8]) -> Decoded<MatchAgainstScoreMessage> {
    decode_with(&mut Cursor::new(payload), "pk_score", scan_match_against_score)
}

fn scan_match_against_score(
    cur: &mut Cursor<'_>,
    out: &mut Decoded<MatchAgainstScoreMessage>,
) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        let msg = &mut out.value;
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_VARINT) => msg.match_score = cur.read_varint64(false)?,
            (3, WIRE_VARINT) => msg.own_score = cur.read_varint64(false)?,
            (4, WIRE_VARINT) => msg.against_score = cur.read_varint64(false)?,
            (5, WIRE_VARINT) => msg.battle_status = cur.read_varint32()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// `WebcastLinkMicMessage`: 2 scene, 3 mic status, 4 anchor list (skipped).
pub fn decode_link_mic(payload: &[u8]) -> Decoded<LinkMicMessage> {
    decode_with(&mut Cursor::new(payload), "link_mic", scan_link_mic)
}

fn scan_link_mic(cur: &mut Cursor<'_>, out: &mut Decoded<LinkMicMessage>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_VARINT) => out.value.scene = cur.read_varint32()?,
            (3, WIRE_VARINT) => out.value.mic_status = cur.read_varint32()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// `WebcastLinkMicBattle`: 2 status, 3 duration, 4 items (skipped).
pub fn decode_link_mic_battle(payload: &[u8]) -> Decoded<LinkMicBattleMessage> {
    decode_with(&mut Cursor::new(payload), "link_mic_battle", scan_link_mic_battle)
}

fn scan_link_mic_battle(
    cur: &mut Cursor<'_>,
    out: &mut Decoded<LinkMicBattleMessage>,
) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_VARINT) => out.value.battle_status = cur.read_varint32()?,
            (3, WIRE_VARINT) => out.value.battle_duration = cur.read_varint32()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// `WebcastLinkMicArmies`: 2 army entry (repeated).
pub fn decode_link_mic_armies(payload: &[u8]) -> Decoded<LinkMicArmiesMessage> {
    decode_with(&mut Cursor::new(payload), "link_mic_armies", scan_link_mic_armies)
}

fn scan_link_mic_armies(
    cur: &mut Cursor<'_>,
    out: &mut Decoded<LinkMicArmiesMessage>,
) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_LEN) => {
                cur.nested(Cursor::skip_to_limit)?;
                out.value.armies += 1;
            }
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}
