//! Per-call decode statistics.
//!
//! Returned by value from every decode call; callers that want running totals
//! fold results together with [`DecodeStats::merge`]. Nothing here is global.

use serde::Serialize;

use crate::message::LiveEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    pub frames: u64,
    pub messages: u64,
    pub chat: u64,
    pub gift: u64,
    pub like: u64,
    pub member: u64,
    pub social: u64,
    pub viewer_count: u64,
    pub room_stats: u64,
    /// PK score updates and link-mic battles.
    pub pk: u64,
    pub link_mic: u64,
    pub rank: u64,
    /// Recognized types without a dedicated counter.
    pub other: u64,
    pub unknown: u64,
    /// Inner messages with no method name; not dispatched, no record.
    pub skipped: u64,
    /// Messages whose field scan stopped early.
    pub partial: u64,
    /// Gzip payloads (outer or inner) that could not be inflated.
    pub inflate_failures: u64,
    /// Most recent viewer total seen, as sent on the wire.
    pub last_viewer_total: Option<String>,
}

impl DecodeStats {
    /// Count one dispatched message.
    pub fn record(&mut self, event: &LiveEvent, partial: bool) {
        self.messages += 1;
        if partial {
            self.partial += 1;
        }
        match event {
            LiveEvent::Chat(_) => self.chat += 1,
            LiveEvent::Gift(_) => self.gift += 1,
            LiveEvent::Like(_) => self.like += 1,
            LiveEvent::Member(_) => self.member += 1,
            LiveEvent::Social(_) => self.social += 1,
            LiveEvent::ViewerSeq(seq) => {
                self.viewer_count += 1;
                if !seq.total.is_empty() {
                    self.last_viewer_total = Some(seq.total.clone());
                }
            }
            LiveEvent::RoomStats(_) => self.room_stats += 1,
            LiveEvent::MatchAgainstScore(_) | LiveEvent::LinkMicBattle(_) => self.pk += 1,
            LiveEvent::LinkMic(_) | LiveEvent::LinkMicArmies(_) => self.link_mic += 1,
            LiveEvent::RankUpdate(_) | LiveEvent::RoomRank(_) => self.rank += 1,
            LiveEvent::Control(_)
            | LiveEvent::Fansclub(_)
            | LiveEvent::EmojiChat(_)
            | LiveEvent::Room(_)
            | LiveEvent::Banner(_)
            | LiveEvent::Barrage(_)
            | LiveEvent::CommonText(_)
            | LiveEvent::ProductChange(_) => self.other += 1,
            LiveEvent::Unknown { .. } => self.unknown += 1,
        }
    }

    /// Fold `other` into `self`. Later viewer totals win.
    pub fn merge(&mut self, other: &DecodeStats) {
        self.frames += other.frames;
        self.messages += other.messages;
        self.chat += other.chat;
        self.gift += other.gift;
        self.like += other.like;
        self.member += other.member;
        self.social += other.social;
        self.viewer_count += other.viewer_count;
        self.room_stats += other.room_stats;
        self.pk += other.pk;
        self.link_mic += other.link_mic;
        self.rank += other.rank;
        self.other += other.other;
        self.unknown += other.unknown;
        self.skipped += other.skipped;
        self.partial += other.partial;
        self.inflate_failures += other.inflate_failures;
        if other.last_viewer_total.is_some() {
            self.last_viewer_total = other.last_viewer_total.clone();
        }
    }
}
