//! Embedded user sub-message.

use crate::error::Result;
use crate::message::{decode_with, Decoded};
use crate::wire::{Cursor, WIRE_LEN, WIRE_VARINT};

/// User identity as carried by chat, gift, like, member and social events.
/// Each decode produces a fresh copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub short_id: String,
    pub nickname: String,
    pub gender: i32,
    pub level: i32,
}

/// Decode a user from a cursor already confined to the sub-message.
pub fn decode_user(cur: &mut Cursor<'_>) -> Decoded<User> {
    decode_with(cur, "user", scan_user)
}

/// Decode the length-delimited user at the cursor.
pub(crate) fn nested_user<T>(cur: &mut Cursor<'_>, out: &mut Decoded<T>) -> Result<User> {
    let user = cur.nested(decode_user)?;
    Ok(out.absorb(user))
}

fn scan_user(cur: &mut Cursor<'_>, out: &mut Decoded<User>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        let user = &mut out.value;
        match (tag.field, tag.wire_type) {
            (1, WIRE_VARINT) => user.id = cur.read_varint64(true)?,
            (2, WIRE_VARINT) => user.short_id = cur.read_varint64(true)?,
            (3, WIRE_LEN) => user.nickname = cur.read_len_string()?,
            (4, WIRE_VARINT) => user.gender = cur.read_varint32()?,
            (6, WIRE_VARINT) => user.level = cur.read_varint32()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}
