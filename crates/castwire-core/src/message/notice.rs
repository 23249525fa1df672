//! Text notices: banners, barrage, system text and product changes.

use crate::error::Result;
use crate::message::user::{nested_user, User};
use crate::message::{decode_with, skip_common, Decoded};
use crate::wire::{Cursor, WIRE_LEN, WIRE_VARINT};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerMessage {
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarrageMessage {
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonTextMessage {
    pub user: Option<User>,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChangeMessage {
    /// 1 = listed, 2 = delisted.
    pub update_type: i32,
    pub product_id: String,
}

/// `WebcastInRoomBannerMessage`: 2 content.
pub fn decode_banner(payload: &[u8]) -> Decoded<BannerMessage> {
    decode_with(&mut Cursor::new(payload), "banner", scan_banner)
}

fn scan_banner(cur: &mut Cursor<'_>, out: &mut Decoded<BannerMessage>) -> Result<()> {
    scan_content(cur, &mut out.value.content)
}

/// `WebcastBarrageMessage`: 2 content.
pub fn decode_barrage(payload: &[u8]) -> Decoded<BarrageMessage> {
    decode_with(&mut Cursor::new(payload), "barrage", scan_barrage)
}

fn scan_barrage(cur: &mut Cursor<'_>, out: &mut Decoded<BarrageMessage>) -> Result<()> {
    scan_content(cur, &mut out.value.content)
}

fn scan_content(cur: &mut Cursor<'_>, content: &mut String) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_LEN) => *content = cur.read_len_string()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// `WebcastCommonTextMessage`: 2 user, 3 content.
pub fn decode_common_text(payload: &[u8]) -> Decoded<CommonTextMessage> {
    decode_with(&mut Cursor::new(payload), "common_text", scan_common_text)
}

fn scan_common_text(cur: &mut Cursor<'_>, out: &mut Decoded<CommonTextMessage>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_LEN) => out.value.user = Some(nested_user(cur, out)?),
            (3, WIRE_LEN) => out.value.content = cur.read_len_string()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}

/// `WebcastProductChangeMessage`: 2 update type, 3 product id.
pub fn decode_product_change(payload: &[u8]) -> Decoded<ProductChangeMessage> {
    decode_with(&mut Cursor::new(payload), "product_change", scan_product_change)
}

fn scan_product_change(
    cur: &mut Cursor<'_>,
    out: &mut Decoded<ProductChangeMessage>,
) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_VARINT) => out.value.update_type = cur.read_varint32()?,
            (3, WIRE_LEN) => out.value.product_id = cur.read_len_string()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}
