//! Gift messages and the nested gift detail.

use crate::error::Result;
use crate::message::user::{nested_user, User};
use crate::message::{decode_with, skip_common, Decoded};
use crate::wire::{Cursor, WIRE_LEN, WIRE_VARINT};

/// Gift detail. Note the upstream numbering: id is 5, value 12, name 16.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiftStruct {
    pub id: String,
    pub name: String,
    pub diamond_count: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiftMessage {
    /// Sender (field 7).
    pub user: Option<User>,
    /// Receiver (field 8), set in multi-anchor rooms.
    pub to_user: Option<User>,
    pub gift: Option<GiftStruct>,
    /// Top-level gift id (field 2), used when the detail is absent.
    pub gift_id: String,
    pub group_count: String,
    pub repeat_count: String,
    pub combo_count: String,
    pub repeat_end: String,
    pub log_id: String,
    pub send_type: i32,
    pub total_coin: String,
}

impl GiftMessage {
    /// Gift quantity: first non-zero of group, repeat, combo count, else "1".
    pub fn gift_count(&self) -> &str {
        [&self.group_count, &self.repeat_count, &self.combo_count]
            .into_iter()
            .find(|c| !c.is_empty() && c.as_str() != "0")
            .map_or("1", String::as_str)
    }

    /// Gift id from the detail when present, else the top-level id.
    pub fn effective_gift_id(&self) -> &str {
        match &self.gift {
            Some(g) if !g.id.is_empty() => &g.id,
            _ => &self.gift_id,
        }
    }
}

/// `WebcastGiftMessage`.
pub fn decode_gift(payload: &[u8]) -> Decoded<GiftMessage> {
    decode_with(&mut Cursor::new(payload), "gift", scan_gift)
}

fn scan_gift(cur: &mut Cursor<'_>, out: &mut Decoded<GiftMessage>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_VARINT) => out.value.gift_id = cur.read_varint64(true)?,
            (4, WIRE_VARINT) => out.value.group_count = cur.read_varint64(true)?,
            (5, WIRE_VARINT) => out.value.repeat_count = cur.read_varint64(true)?,
            (6, WIRE_VARINT) => out.value.combo_count = cur.read_varint64(true)?,
            (7, WIRE_LEN) => out.value.user = Some(nested_user(cur, out)?),
            (8, WIRE_LEN) => out.value.to_user = Some(nested_user(cur, out)?),
            (9, WIRE_VARINT) => out.value.repeat_end = cur.read_varint64(true)?,
            (15, WIRE_LEN) => {
                let gift = cur.nested(decode_gift_struct)?;
                out.value.gift = Some(out.absorb(gift));
            }
            (16, WIRE_LEN) => out.value.log_id = cur.read_len_string()?,
            (17, WIRE_VARINT) => out.value.send_type = cur.read_varint32()?,
            (23, WIRE_VARINT) => out.value.total_coin = cur.read_varint64(true)?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// Decode a gift detail from a cursor confined to the sub-message.
pub fn decode_gift_struct(cur: &mut Cursor<'_>) -> Decoded<GiftStruct> {
    decode_with(cur, "gift_struct", scan_gift_struct)
}

fn scan_gift_struct(cur: &mut Cursor<'_>, out: &mut Decoded<GiftStruct>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        let gift = &mut out.value;
        match (tag.field, tag.wire_type) {
            (5, WIRE_VARINT) => gift.id = cur.read_varint64(true)?,
            (12, WIRE_VARINT) => gift.diamond_count = cur.read_varint32()?,
            (16, WIRE_LEN) => gift.name = cur.read_len_string()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}
