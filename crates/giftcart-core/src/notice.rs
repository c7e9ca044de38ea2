//! # Gift Notice
//!
//! The transient "you got a free gift!" banner.
//!
//! ## Last Grant Wins
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Notice Token Lifecycle                               │
//! │                                                                         │
//! │  grant ──► token #1 ──► timer(#1) armed                                │
//! │                                                                         │
//! │  (gift revoked, cart crosses threshold again before #1 fires)          │
//! │                                                                         │
//! │  grant ──► token #2 ──► timer(#2) armed, timer(#1) superseded          │
//! │                                                                         │
//! │  timer(#1) fires ──► expire(#1) ──► stale, ignored                     │
//! │  timer(#2) fires ──► expire(#2) ──► banner cleared                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The board has no clock. Whoever owns the timer calls
//! [`NoticeBoard::expire`] with the token it was handed at grant time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifies a single gift grant. Strictly increasing per board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NoticeToken(u64);

impl NoticeToken {
    #[inline]
    pub const fn generation(&self) -> u64 {
        self.0
    }
}

/// An active "gift granted" notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GiftNotice {
    pub token: NoticeToken,

    /// Name of the gift that was granted, for the banner text.
    pub gift_name: String,

    #[ts(as = "String")]
    pub granted_at: DateTime<Utc>,
}

/// Holds at most one active notice and hands out tokens.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    last_generation: u64,
    current: Option<GiftNotice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts a fresh notice, replacing any current one.
    pub fn post(&mut self, gift_name: &str) -> NoticeToken {
        self.last_generation += 1;
        let token = NoticeToken(self.last_generation);
        self.current = Some(GiftNotice {
            token,
            gift_name: gift_name.to_string(),
            granted_at: Utc::now(),
        });
        token
    }

    /// Clears the notice if `token` belongs to the latest grant.
    ///
    /// Returns `true` if a notice was cleared. Stale tokens are ignored.
    pub fn expire(&mut self, token: NoticeToken) -> bool {
        match &self.current {
            Some(notice) if notice.token == token => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Clears the notice regardless of token (user closed the banner).
    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn current(&self) -> Option<&GiftNotice> {
        self.current.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}
