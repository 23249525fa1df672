//! Audience activity: likes, room entries, follows, fan club events.

use crate::error::Result;
use crate::message::user::{nested_user, User};
use crate::message::{decode_with, skip_common, Decoded};
use crate::wire::{Cursor, WIRE_LEN, WIRE_VARINT};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikeMessage {
    pub user: Option<User>,
    pub count: String,
    pub total: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberMessage {
    pub user: Option<User>,
    pub member_count: String,
    /// 1 = entered, 2 = entered after following.
    pub action: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialMessage {
    pub user: Option<User>,
    pub follow_count: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FansclubMessage {
    pub user: Option<User>,
    pub kind: i32,
}

/// `WebcastLikeMessage`: 2 user, 3 count, 4 total.
pub fn decode_like(payload: &[u8]) -> Decoded<LikeMessage> {
    decode_with(&mut Cursor::new(payload), "like", scan_like)
}

fn scan_like(cur: &mut Cursor<'_>, out: &mut Decoded<LikeMessage>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_LEN) => out.value.user = Some(nested_user(cur, out)?),
            (3, WIRE_VARINT) => out.value.count = cur.read_varint64(true)?,
            (4, WIRE_VARINT) => out.value.total = cur.read_varint64(true)?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// `WebcastMemberMessage`: 2 user, 3 member count, 8 action.
pub fn decode_member(payload: &[u8]) -> Decoded<MemberMessage> {
    decode_with(&mut Cursor::new(payload), "member", scan_member)
}

fn scan_member(cur: &mut Cursor<'_>, out: &mut Decoded<MemberMessage>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_LEN) => out.value.user = Some(nested_user(cur, out)?),
            (3, WIRE_VARINT) => out.value.member_count = cur.read_varint64(true)?,
            (8, WIRE_VARINT) => out.value.action = cur.read_varint32()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// `WebcastSocialMessage`: 2 user, 3 follow count.
pub fn decode_social(payload: &[u8]) -> Decoded<SocialMessage> {
    decode_with(&mut Cursor::new(payload), "social", scan_social)
}

fn scan_social(cur: &mut Cursor<'_>, out: &mut Decoded<SocialMessage>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_LEN) => out.value.user = Some(nested_user(cur, out)?),
            (3, WIRE_VARINT) => out.value.follow_count = cur.read_varint64(true)?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// `WebcastFansclubMessage`: 2 type, 4 user.
pub fn decode_fansclub(payload: &[u8]) -> Decoded<FansclubMessage> {
    decode_with(&mut Cursor::new(payload), "fansclub", scan_fansclub)
}

fn scan_fansclub(cur: &mut Cursor<'_>, out: &mut Decoded<FansclubMessage>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_VARINT) => out.value.kind = cur.read_varint32()?,
            (4, WIRE_LEN) => out.value.user = Some(nested_user(cur, out)?),
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}
