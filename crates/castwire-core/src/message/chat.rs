//! Chat and emoji chat messages.

use crate::error::Result;
use crate::message::user::{nested_user, User};
use crate::message::{decode_with, skip_common, Decoded};
use crate::wire::{Cursor, WIRE_LEN};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatMessage {
    pub user: Option<User>,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiChatMessage {
    pub user: Option<User>,
    pub content: String,
    pub emoji_id: String,
}

/// `WebcastChatMessage`: 1 common, 2 user, 3 content.
pub fn decode_chat(payload: &[u8]) -> Decoded<ChatMessage> {
    decode_with(&mut Cursor::new(payload), "chat", scan_chat)
}

fn scan_chat(cur: &mut Cursor<'_>, out: &mut Decoded<ChatMessage>) -> Result<()> {
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

/// `WebcastEmojiChatMessage`: 2 user, 3 content, 4 emoji id.
pub fn decode_emoji_chat(payload: &[u8]) -> Decoded<EmojiChatMessage> {
    decode_with(&mut Cursor::new(payload), "emoji", scan_emoji_chat)
}

fn scan_emoji_chat(cur: &mut Cursor<'_>, out: &mut Decoded<EmojiChatMessage>) -> Result<()> {
    while !cur.at_end() {
        let Some(tag) = cur.read_tag()? else {
            break;
        };
        match (tag.field, tag.wire_type) {
            (1, WIRE_LEN) => skip_common(cur)?,
            (2, WIRE_LEN) => out.value.user = Some(nested_user(cur, out)?),
            (3, WIRE_LEN) => out.value.content = cur.read_len_string()?,
            (4, WIRE_LEN) => out.value.emoji_id = cur.read_len_string()?,
            (_, wire_type) => cur.skip_unknown_field(wire_type)?,
        }
    }
    Ok(())
}
