//! Static method-name dispatch.
//!
//! The table is fixed at compile time; lookup is an exact, case-sensitive
//! string match. Methods not in the table are an expected outcome (the feed
//! keeps adding event types) and pass through as [`LiveEvent::Unknown`].

use std::borrow::Cow;

use crate::batch::InnerMessage;
use crate::compress;
use crate::message::{audience, battle, chat, gift, notice, rank, room, Decoded, LiveEvent};
use crate::options::DecodeOptions;

/// One row of the dispatch table.
pub struct Registration {
    pub method: &'static str,
    /// Short name used as `messageType` in records.
    pub message_type: &'static str,
    decode: fn(&[u8]) -> Decoded<LiveEvent>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("method", &self.method)
            .field("message_type", &self.message_type)
            .finish()
    }
}

impl Registration {
    const fn new(
        method: &'static str,
        message_type: &'static str,
        decode: fn(&[u8]) -> Decoded<LiveEvent>,
    ) -> Self {
        Self {
            method,
            message_type,
            decode,
        }
    }

    pub fn decode(&self, payload: &[u8]) -> Decoded<LiveEvent> {
        (self.decode)(payload)
    }
}

pub const CHAT_METHOD: &str = "WebcastChatMessage";
pub const GIFT_METHOD: &str = "WebcastGiftMessage";
pub const LIKE_METHOD: &str = "WebcastLikeMessage";
pub const MEMBER_METHOD: &str = "WebcastMemberMessage";
pub const SOCIAL_METHOD: &str = "WebcastSocialMessage";
pub const ROOM_USER_SEQ_METHOD: &str = "WebcastRoomUserSeqMessage";
pub const ROOM_STATS_METHOD: &str = "WebcastRoomStatsMessage";
pub const CONTROL_METHOD: &str = "WebcastControlMessage";
pub const FANSCLUB_METHOD: &str = "WebcastFansclubMessage";
pub const EMOJI_CHAT_METHOD: &str = "WebcastEmojiChatMessage";
pub const ROOM_METHOD: &str = "WebcastRoomMessage";
pub const MATCH_AGAINST_SCORE_METHOD: &str = "WebcastMatchAgainstScoreMessage";
pub const RANK_UPDATE_METHOD: &str = "WebcastRankUpdateMessage";
pub const LINK_MIC_METHOD: &str = "WebcastLinkMicMessage";
pub const LINK_MIC_BATTLE_METHOD: &str = "WebcastLinkMicBattle";
pub const LINK_MIC_ARMIES_METHOD: &str = "WebcastLinkMicArmies";
pub const BANNER_METHOD: &str = "WebcastInRoomBannerMessage";
pub const PRODUCT_CHANGE_METHOD: &str = "WebcastProductChangeMessage";
pub const COMMON_TEXT_METHOD: &str = "WebcastCommonTextMessage";
pub const BARRAGE_METHOD: &str = "WebcastBarrageMessage";
pub const ROOM_RANK_METHOD: &str = "WebcastRoomRankMessage";

static REGISTRY: &[Registration] = &[
    Registration::new(CHAT_METHOD, "chat", decode_chat),
    Registration::new(GIFT_METHOD, "gift", decode_gift),
    Registration::new(LIKE_METHOD, "like", decode_like),
    Registration::new(MEMBER_METHOD, "member", decode_member),
    Registration::new(SOCIAL_METHOD, "social", decode_social),
    Registration::new(ROOM_USER_SEQ_METHOD, "viewer_count", decode_room_user_seq),
    Registration::new(ROOM_STATS_METHOD, "room_stats", decode_room_stats),
    Registration::new(CONTROL_METHOD, "control", decode_control),
    Registration::new(FANSCLUB_METHOD, "fansclub", decode_fansclub),
    Registration::new(EMOJI_CHAT_METHOD, "emoji", decode_emoji_chat),
    Registration::new(ROOM_METHOD, "room", decode_room),
    Registration::new(MATCH_AGAINST_SCORE_METHOD, "pk_score", decode_match_against_score),
    Registration::new(RANK_UPDATE_METHOD, "rank_update", decode_rank_update),
    Registration::new(LINK_MIC_METHOD, "link_mic", decode_link_mic),
    Registration::new(LINK_MIC_BATTLE_METHOD, "link_mic_battle", decode_link_mic_battle),
    Registration::new(LINK_MIC_ARMIES_METHOD, "link_mic_armies", decode_link_mic_armies),
    Registration::new(BANNER_METHOD, "banner", decode_banner),
    Registration::new(PRODUCT_CHANGE_METHOD, "product_change", decode_product_change),
    Registration::new(COMMON_TEXT_METHOD, "common_text", decode_common_text),
    Registration::new(BARRAGE_METHOD, "barrage", decode_barrage),
    Registration::new(ROOM_RANK_METHOD, "room_rank", decode_room_rank),
];

fn decode_chat(p: &[u8]) -> Decoded<LiveEvent> {
    chat::decode_chat(p).map(LiveEvent::Chat)
}
fn decode_gift(p: &[u8]) -> Decoded<LiveEvent> {
    gift::decode_gift(p).map(LiveEvent::Gift)
}
fn decode_like(p: &[u8]) -> Decoded<LiveEvent> {
    audience::decode_like(p).map(LiveEvent::Like)
}
fn decode_member(p: &[u8]) -> Decoded<LiveEvent> {
    audience::decode_member(p).map(LiveEvent::Member)
}
fn decode_social(p: &[u8]) -> Decoded<LiveEvent> {
    audience::decode_social(p).map(LiveEvent::Social)
}
fn decode_room_user_seq(p: &[u8]) -> Decoded<LiveEvent> {
    room::decode_room_user_seq(p).map(LiveEvent::ViewerSeq)
}
fn decode_room_stats(p: &[u8]) -> Decoded<LiveEvent> {
    room::decode_room_stats(p).map(LiveEvent::RoomStats)
}
fn decode_control(p: &[u8]) -> Decoded<LiveEvent> {
    room::decode_control(p).map(LiveEvent::Control)
}
fn decode_fansclub(p: &[u8]) -> Decoded<LiveEvent> {
    audience::decode_fansclub(p).map(LiveEvent::Fansclub)
}
fn decode_emoji_chat(p: &[u8]) -> Decoded<LiveEvent> {
    chat::decode_emoji_chat(p).map(LiveEvent::EmojiChat)
}
fn decode_room(p: &[u8]) -> Decoded<LiveEvent> {
    room::decode_room(p).map(LiveEvent::Room)
}
fn decode_match_against_score(p: &[u8]) -> Decoded<LiveEvent> {
    battle::decode_match_against_score(p).map(LiveEvent::MatchAgainstScore)
}
fn decode_rank_update(p: &[u8]) -> Decoded<LiveEvent> {
    rank::decode_rank_update(p).map(LiveEvent::RankUpdate)
}
fn decode_link_mic(p: &[u8]) -> Decoded<LiveEvent> {
    battle::decode_link_mic(p).map(LiveEvent::LinkMic)
}
fn decode_link_mic_battle(p: &[u8]) -> Decoded<LiveEvent> {
    battle::decode_link_mic_battle(p).map(LiveEvent::LinkMicBattle)
}
fn decode_link_mic_armies(p: &[u8]) -> Decoded<LiveEvent> {
    battle::decode_link_mic_armies(p).map(LiveEvent::LinkMicArmies)
}
fn decode_banner(p: &[u8]) -> Decoded<LiveEvent> {
    notice::decode_banner(p).map(LiveEvent::Banner)
}
fn decode_product_change(p: &[u8]) -> Decoded<LiveEvent> {
    notice::decode_product_change(p).map(LiveEvent::ProductChange)
}
fn decode_common_text(p: &[u8]) -> Decoded<LiveEvent> {
    notice::decode_common_text(p).map(LiveEvent::CommonText)
}
fn decode_barrage(p: &[u8]) -> Decoded<LiveEvent> {
    notice::decode_barrage(p).map(LiveEvent::Barrage)
}
fn decode_room_rank(p: &[u8]) -> Decoded<LiveEvent> {
    rank::decode_room_rank(p).map(LiveEvent::RoomRank)
}

/// Find the registration for `method`.
pub fn lookup(method: &str) -> Option<&'static Registration> {
    REGISTRY.iter().find(|r| r.method == method)
}

/// Every method the decoder understands, in table order.
pub fn registered_methods() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|r| r.method)
}

/// Outcome of dispatching one inner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub method: String,
    /// Short type name, or the method itself for unknown methods.
    pub message_type: String,
    pub event: LiveEvent,
    /// The per-type scan stopped early; `event` holds what was read.
    pub partial: bool,
    /// The payload looked gzipped but could not be inflated.
    pub inflate_failed: bool,
}

/// Decode one inner message through the dispatch table.
pub fn decode_inner(msg: &InnerMessage, opts: &DecodeOptions) -> Dispatched {
    let Some(reg) = lookup(&msg.method) else {
        tracing::debug!(method = %msg.method, "unregistered method; passing through");
        return Dispatched {
            method: msg.method.clone(),
            message_type: msg.method.clone(),
            event: LiveEvent::Unknown {
                method: msg.method.clone(),
            },
            partial: false,
            inflate_failed: false,
        };
    };

    let mut inflate_failed = false;
    let sniff = opts.sniff_inner_gzip && compress::has_gzip_magic(&msg.payload);
    let payload: Cow<'_, [u8]> = if sniff {
        match compress::gunzip(&msg.payload, opts.max_decompressed_bytes) {
            Ok(inflated) => Cow::Owned(inflated),
            Err(e) => {
                tracing::warn!(method = %msg.method, error = %e, "inner payload inflate failed");
                inflate_failed = true;
                Cow::Borrowed(&msg.payload[..])
            }
        }
    } else {
        Cow::Borrowed(&msg.payload[..])
    };

    let decoded = reg.decode(&payload);
    if decoded.truncated {
        tracing::warn!(
            method = %msg.method,
            payload_len = payload.len(),
            "message decoded partially"
        );
    }

    Dispatched {
        method: msg.method.clone(),
        message_type: reg.message_type.to_owned(),
        event: decoded.value,
        partial: decoded.truncated,
        inflate_failed,
    }
}
