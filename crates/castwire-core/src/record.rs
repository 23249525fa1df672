//! Projection of decoded events into uniform, string-keyed records.
//!
//! Records are ordered JSON objects. 64-bit counters stay decimal strings;
//! only 32-bit enums and levels are emitted as JSON numbers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dispatch::Dispatched;
use crate::message::{GiftMessage, GiftStruct, LiveEvent, User};
use crate::options::DecodeOptions;

/// Name used when an event carries no user at all.
pub const ANONYMOUS: &str = "anonymous";

/// One output record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRecord(Map<String, Value>);

impl EventRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_owned(), value.into());
    }

    pub fn method(&self) -> &str {
        self.get_str("method").unwrap_or_default()
    }

    pub fn message_type(&self) -> &str {
        self.get_str("messageType").unwrap_or_default()
    }

    pub fn is_partial(&self) -> bool {
        matches!(self.0.get("partial"), Some(Value::Bool(true)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    fn insert_nonempty(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.insert(key, value);
        }
    }

    fn insert_nonzero(&mut self, key: &str, value: &str) {
        if !value.is_empty() && value != "0" {
            self.insert(key, value);
        }
    }
}

/// Build the record for one dispatched message.
///
/// `timestamp` is the batch's server clock; it is copied verbatim so that
/// decoding the same input twice yields identical records.
pub fn project(d: &Dispatched, timestamp: &str, opts: &DecodeOptions) -> EventRecord {
    let mut rec = EventRecord::default();
    rec.insert("method", d.method.as_str());
    rec.insert("messageType", d.message_type.as_str());
    rec.insert("timestamp", timestamp);

    let display = match &d.event {
        LiveEvent::Chat(m) => {
            let name = display_name(m.user.as_ref());
            rec.insert("user", name.as_str());
            rec.insert("userId", user_id(m.user.as_ref()));
            rec.insert("level", m.user.as_ref().map_or(0, |u| u.level));
            rec.insert("content", m.content.as_str());
            Some(format!("{name}: {}", m.content))
        }
        LiveEvent::Gift(m) => Some(project_gift(&mut rec, m)),
        LiveEvent::Like(m) => {
            let name = display_name(m.user.as_ref());
            rec.insert("user", name.as_str());
            if let Some(u) = &m.user {
                rec.insert("userId", u.id.as_str());
            }
            rec.insert("count", m.count.as_str());
            rec.insert("total", m.total.as_str());
            Some(format!("{name} liked x{} (total {})", m.count, m.total))
        }
        LiveEvent::Member(m) => {
            let name = display_name(m.user.as_ref());
            rec.insert("user", name.as_str());
            rec.insert("userId", user_id(m.user.as_ref()));
            rec.insert("memberCount", m.member_count.as_str());
            rec.insert("action", m.action);
            Some(format!("{name} joined ({} in room)", m.member_count))
        }
        LiveEvent::Social(m) => {
            let name = display_name(m.user.as_ref());
            rec.insert("user", name.as_str());
            rec.insert("userId", user_id(m.user.as_ref()));
            rec.insert("followCount", m.follow_count.as_str());
            Some(format!("{name} followed"))
        }
        LiveEvent::ViewerSeq(m) => {
            rec.insert("total", m.total.as_str());
            rec.insert("totalUser", m.total_user.as_str());
            rec.insert("totalPvForAnchor", m.total_pv_for_anchor.as_str());
            Some(format!("viewers {}", m.total))
        }
        LiveEvent::RoomStats(m) => {
            rec.insert("displayShort", m.display_short.as_str());
            rec.insert("displayMiddle", m.display_middle.as_str());
            rec.insert("displayLong", m.display_long.as_str());
            [&m.display_long, &m.display_middle, &m.display_short]
                .into_iter()
                .find(|s| !s.is_empty())
                .cloned()
        }
        LiveEvent::Control(m) => {
            rec.insert("action", m.action);
            Some(format!("control action {}", m.action))
        }
        LiveEvent::Fansclub(m) => {
            if let Some(u) = &m.user {
                rec.insert("user", display_name(Some(u)));
                rec.insert("userId", u.id.as_str());
            }
            rec.insert("type", m.kind);
            Some(format!("{} fan club event {}", display_name(m.user.as_ref()), m.kind))
        }
        LiveEvent::EmojiChat(m) => {
            if let Some(u) = &m.user {
                rec.insert("user", display_name(Some(u)));
                rec.insert("userId", u.id.as_str());
            }
            rec.insert("content", m.content.as_str());
            rec.insert("emojiId", m.emoji_id.as_str());
            Some(format!("{}: {}", display_name(m.user.as_ref()), m.content))
        }
        LiveEvent::Room(m) => {
            rec.insert("content", m.content.as_str());
            rec.insert("roomStatus", m.room_status);
            let status = room_status_text(m.room_status);
            if let Some(text) = status {
                rec.insert("statusText", text);
            }
            if m.content.is_empty() {
                status.map(str::to_owned)
            } else {
                Some(m.content.clone())
            }
        }
        LiveEvent::MatchAgainstScore(m) => {
            rec.insert("matchScore", m.match_score.as_str());
            rec.insert("ownScore", m.own_score.as_str());
            rec.insert("againstScore", m.against_score.as_str());
            rec.insert("battleStatus", m.battle_status);
            Some(format!("PK score {} vs {}", m.own_score, m.against_score))
        }
        LiveEvent::RankUpdate(m) | LiveEvent::RoomRank(m) => {
            rec.insert("rankType", m.rank_type);
            rec.insert("rankEntries", m.entries);
            Some(format!("rank {} updated ({} entries)", m.rank_type, m.entries))
        }
        LiveEvent::LinkMic(m) => {
            rec.insert("scene", m.scene);
            rec.insert("micStatus", m.mic_status);
            Some(format!("link mic scene {} status {}", m.scene, m.mic_status))
        }
        LiveEvent::LinkMicBattle(m) => {
            rec.insert("battleStatus", m.battle_status);
            rec.insert("battleDuration", m.battle_duration);
            Some(format!("battle status {} ({}s)", m.battle_status, m.battle_duration))
        }
        LiveEvent::LinkMicArmies(m) => {
            rec.insert("armies", m.armies);
            Some(format!("{} armies", m.armies))
        }
        LiveEvent::Banner(m) => {
            rec.insert("content", m.content.as_str());
            Some(m.content.clone())
        }
        LiveEvent::Barrage(m) => {
            rec.insert("content", m.content.as_str());
            Some(m.content.clone())
        }
        LiveEvent::CommonText(m) => {
            if let Some(u) = &m.user {
                rec.insert("user", display_name(Some(u)));
                rec.insert("userId", u.id.as_str());
            }
            rec.insert("content", m.content.as_str());
            Some(m.content.clone())
        }
        LiveEvent::ProductChange(m) => {
            rec.insert("updateType", m.update_type);
            rec.insert("productId", m.product_id.as_str());
            Some(format!("product {} changed ({})", m.product_id, m.update_type))
        }
        LiveEvent::Unknown { .. } => None,
    };

    if d.partial {
        rec.insert("partial", true);
    }
    if opts.display {
        if let Some(line) = display {
            rec.insert("display", line);
        }
    }
    rec
}

fn project_gift(rec: &mut EventRecord, m: &GiftMessage) -> String {
    let sender = display_name(m.user.as_ref());
    rec.insert("user", sender.as_str());
    rec.insert("userId", user_id(m.user.as_ref()));
    rec.insert("userLevel", m.user.as_ref().map_or(0, |u| u.level));

    let receiver = m.to_user.as_ref().map(|u| display_name(Some(u)));
    if let (Some(u), Some(name)) = (&m.to_user, &receiver) {
        rec.insert("toUser", name.as_str());
        rec.insert("toUserId", u.id.as_str());
    }

    let name = gift_name(m.gift.as_ref(), m.effective_gift_id());
    if let Some(g) = &m.gift {
        rec.insert("giftName", name.as_str());
        rec.insert("giftId", m.effective_gift_id());
        rec.insert("diamondCount", g.diamond_count);
    } else {
        rec.insert("giftId", m.gift_id.as_str());
    }

    let count = m.gift_count();
    rec.insert("giftCount", count);
    rec.insert_nonzero("comboCount", &m.combo_count);
    if !m.repeat_end.is_empty() {
        rec.insert("repeatEnd", m.repeat_end.as_str());
        rec.insert("isComboEnd", m.repeat_end == "1");
    }
    rec.insert_nonzero("totalCoin", &m.total_coin);
    rec.insert_nonempty("logId", &m.log_id);
    if m.send_type > 0 {
        rec.insert("sendType", m.send_type);
    }

    match receiver {
        Some(to) => format!("{sender} sent {name} x{count} -> {to}"),
        None => format!("{sender} sent {name} x{count}"),
    }
}

/// Nickname when set, else a name derived from the id, else [`ANONYMOUS`].
///
/// A non-empty nickname is used exactly as sent, whitespace included.
pub fn display_name(user: Option<&User>) -> String {
    let Some(user) = user else {
        return ANONYMOUS.to_owned();
    };
    if !user.nickname.is_empty() {
        user.nickname.clone()
    } else if !user.id.is_empty() {
        format!("user{}", user.id)
    } else {
        ANONYMOUS.to_owned()
    }
}

fn user_id(user: Option<&User>) -> &str {
    user.map_or("", |u| u.id.as_str())
}

fn gift_name(gift: Option<&GiftStruct>, id: &str) -> String {
    match gift.map(|g| g.name.trim()) {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ if !id.is_empty() => format!("gift{id}"),
        _ => "unknown gift".to_owned(),
    }
}

fn room_status_text(status: i32) -> Option<&'static str> {
    match status {
        1 => Some("live"),
        2 => Some("ended"),
        _ => None,
    }
}
