//! # Cart View
//!
//! The read-only snapshot handed to the renderer once per frame.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart Summary                                                           │
//! │  ───────────────────────────────────────────────                        │
//! │  Subtotal:                                  900        ◄── subtotal     │
//! │  Add 100 more to get a FREE Wireless Mouse!            ◄── remaining    │
//! │  [██████████████████████████████████░░░░]              ◄── progress     │
//! │                                                                         │
//! │  Headphones   100 × 9 = 900        [-] 9 [+]           ◄── lines        │
//! │  Wireless Mouse                    FREE GIFT           ◄── gift_id      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Serialized with camelCase keys; the TypeScript type is generated by ts-rs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::notice::GiftNotice;
use crate::types::{CartLine, ProductId};

/// One consistent frame of cart state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartView {
    /// Lines in display order, gift included.
    pub lines: Vec<CartLine>,

    pub subtotal: Money,

    /// Spend that unlocks the gift.
    pub threshold: Money,

    /// Capped percentage toward the threshold (0-100).
    pub progress: f64,

    /// Amount still needed for the gift; zero once unlocked.
    pub remaining: Money,

    /// Reserved gift id. Lines with this id get no +/- controls.
    pub gift_id: ProductId,

    pub gift_unlocked: bool,

    /// Active "gift granted" banner, if any.
    pub notice: Option<GiftNotice>,
}

impl CartView {
    /// True if `line` is the engine-managed gift.
    pub fn is_gift(&self, line: &CartLine) -> bool {
        line.id == self.gift_id
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
