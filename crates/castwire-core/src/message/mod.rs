//! Per-type inner message decoders.
//!
//! Every decoder is the same flat loop: read a tag, stop on field 0, match on
//! `(field, wire type)`, skip everything else. Field numbers are specific to
//! each message type and are deliberately not shared; a user is field 2 in a
//! chat but field 7 in a gift. A `(field, wire type)` pair that does not match
//! the expected shape is skipped rather than misread.
//!
//! Decoders never fail. A read error ends the loop and the partially filled
//! value comes back with `truncated` set.

pub mod audience;
pub mod battle;
pub mod chat;
pub mod gift;
pub mod notice;
pub mod rank;
pub mod room;
pub mod user;

pub use audience::{FansclubMessage, LikeMessage, MemberMessage, SocialMessage};
pub use battle::{
    LinkMicArmiesMessage, LinkMicBattleMessage, LinkMicMessage, MatchAgainstScoreMessage,
};
pub use chat::{ChatMessage, EmojiChatMessage};
pub use gift::{GiftMessage, GiftStruct};
pub use notice::{BannerMessage, BarrageMessage, CommonTextMessage, ProductChangeMessage};
pub use rank::RankMessage;
pub use room::{ControlMessage, RoomMessage, RoomStatsMessage, RoomUserSeqMessage};
pub use user::User;

use crate::error::Result;
use crate::wire::Cursor;

/// Best-effort decode result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded<T> {
    pub value: T,
    /// The scan hit a read failure here or in a nested sub-message.
    pub truncated: bool,
}

impl<T> Decoded<T> {
    /// Unwrap a nested result, carrying its truncation upwards.
    pub fn absorb<U>(&mut self, inner: Decoded<U>) -> U {
        self.truncated |= inner.truncated;
        inner.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        Decoded {
            value: f(self.value),
            truncated: self.truncated,
        }
    }
}

type ScanFn<T> = for<'a, 'b, 'c> fn(&'b mut Cursor<'a>, &'c mut Decoded<T>) -> Result<()>;

/// Run `scan` until it finishes or fails, keeping whatever it collected.
pub(crate) fn decode_with<T: Default>(
    cur: &mut Cursor<'_>,
    kind: &'static str,
    scan: ScanFn<T>,
) -> Decoded<T> {
    let mut out = Decoded::default();
    if let Err(e) = scan(cur, &mut out) {
        tracing::debug!(kind, error = %e, offset = cur.offset(), "field scan stopped early");
        out.truncated = true;
    }
    out
}

/// Skip the `common` envelope field (field 1 of nearly every message).
pub(crate) fn skip_common(cur: &mut Cursor<'_>) -> Result<()> {
    cur.nested(Cursor::skip_to_limit)
}

/// A decoded inner message, one variant per known method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveEvent {
    Chat(ChatMessage),
    Gift(GiftMessage),
    Like(LikeMessage),
    Member(MemberMessage),
    Social(SocialMessage),
    ViewerSeq(RoomUserSeqMessage),
    RoomStats(RoomStatsMessage),
    Control(ControlMessage),
    Fansclub(FansclubMessage),
    EmojiChat(EmojiChatMessage),
    Room(RoomMessage),
    MatchAgainstScore(MatchAgainstScoreMessage),
    LinkMic(LinkMicMessage),
    LinkMicBattle(LinkMicBattleMessage),
    LinkMicArmies(LinkMicArmiesMessage),
    RankUpdate(RankMessage),
    RoomRank(RankMessage),
    Banner(BannerMessage),
    Barrage(BarrageMessage),
    CommonText(CommonTextMessage),
    ProductChange(ProductChangeMessage),
    /// Method not in the dispatch table; passed through untouched.
    Unknown { method: String },
}
