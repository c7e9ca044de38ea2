//! # Cart Engine
//!
//! Owns the cart lines and enforces the gift-eligibility rule.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every Mutating Operation                             │
//! │                                                                         │
//! │  add_product / change_quantity / remove_product / clear                │
//! │       │                                                                 │
//! │       ├── gift id? ──► Err(GiftLineLocked), state untouched            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mutate lines (drop any line whose quantity hits 0)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reconcile_gift()                                                      │
//! │       ├── subtotal >= threshold && !has_gift ──► append gift, notice   │
//! │       ├── subtotal <  threshold &&  has_gift ──► remove gift           │
//! │       └── otherwise ──────────────────────────► no change              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  return Mutation { change, gift }   (state is steady here)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Steady States
//! ```text
//!                     gift absent        gift present
//!   below threshold   STEADY             corrected by reconcile_gift
//!   at/above          corrected          STEADY
//! ```
//! The gift line is priced at zero, so adding or removing it never moves
//! the subtotal across the threshold. One evaluation per mutation always
//! lands in a steady state.

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::CartConfig;
use crate::error::{CartError, CartResult, CoreResult};
use crate::money::Money;
use crate::notice::{GiftNotice, NoticeBoard, NoticeToken};
use crate::types::{CartLine, Product, ProductId};
use crate::view::CartView;

// =============================================================================
// Mutation Reports
// =============================================================================

/// What happened to the non-gift lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// A new line was appended with quantity 1.
    Added,
    /// An existing line now has this quantity.
    Updated { quantity: u32 },
    /// The line was removed.
    Removed,
    /// All lines were removed.
    Cleared,
    /// A zero delta; nothing to do.
    Unchanged,
    /// No line with that id exists.
    NotInCart,
}

/// What the eligibility rule did after the line change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftTransition {
    Unchanged,
    /// The gift line was appended. The token identifies the new notice.
    Granted(NoticeToken),
    Revoked,
}

/// Result of one mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub change: LineChange,
    pub gift: GiftTransition,
}

impl Mutation {
    /// The notice token, if this mutation granted the gift.
    pub fn granted(&self) -> Option<NoticeToken> {
        match self.gift {
            GiftTransition::Granted(token) => Some(token),
            _ => None,
        }
    }
}

// =============================================================================
// Cart Engine
// =============================================================================

/// Cart state plus the promotion rule that governs it.
///
/// ## Invariants (hold whenever control is outside a method)
/// - Every line has quantity > 0
/// - At most one line carries the gift id
/// - The gift line is present iff subtotal >= threshold
#[derive(Debug, Clone)]
pub struct CartEngine {
    catalog: Catalog,
    config: CartConfig,
    lines: Vec<CartLine>,
    notices: NoticeBoard,
}

impl CartEngine {
    /// Creates an empty cart.
    ///
    /// Fails if the config is invalid for this catalog (see
    /// [`CartConfig::validate`]).
    pub fn new(catalog: Catalog, config: CartConfig) -> CoreResult<Self> {
        config.validate(&catalog)?;

        Ok(CartEngine {
            catalog,
            config,
            lines: Vec::new(),
            notices: NoticeBoard::new(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Already in cart: quantity + 1
    /// - Not in cart: appended with quantity 1 (name and price frozen)
    /// - Gift descriptor: rejected with `GiftLineLocked`
    pub fn add_product(&mut self, product: &Product) -> CartResult<Mutation> {
        self.reject_gift(product.id)?;

        let change = match self.lines.iter_mut().find(|l| l.id == product.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                LineChange::Updated {
                    quantity: line.quantity,
                }
            }
            None => {
                self.lines.push(CartLine::from_product(product, 1));
                LineChange::Added
            }
        };
        debug!(product_id = product.id, ?change, "add_product");

        Ok(self.finish(change))
    }

    /// Applies a signed delta to a line's quantity.
    ///
    /// ## Behavior
    /// - New quantity is `max(0, current + delta)`; 0 removes the line
    /// - `delta == 0`: no change
    /// - Unknown id: `LineChange::NotInCart`, no error
    /// - Gift id: rejected with `GiftLineLocked`, even while the gift is present
    pub fn change_quantity(&mut self, product_id: ProductId, delta: i64) -> CartResult<Mutation> {
        self.reject_gift(product_id)?;

        let change = match self.lines.iter().position(|l| l.id == product_id) {
            None => LineChange::NotInCart,
            Some(_) if delta == 0 => LineChange::Unchanged,
            Some(index) => {
                let current = i64::from(self.lines[index].quantity);
                let next = current.saturating_add(delta).clamp(0, i64::from(u32::MAX)) as u32;

                if next == 0 {
                    self.lines.remove(index);
                    LineChange::Removed
                } else {
                    self.lines[index].quantity = next;
                    LineChange::Updated { quantity: next }
                }
            }
        };
        debug!(product_id, delta, ?change, "change_quantity");

        Ok(self.finish(change))
    }

    /// Removes a line outright, whatever its quantity.
    pub fn remove_product(&mut self, product_id: ProductId) -> CartResult<Mutation> {
        self.reject_gift(product_id)?;

        let before = self.lines.len();
        self.lines.retain(|l| l.id != product_id);
        let change = if self.lines.len() == before {
            LineChange::NotInCart
        } else {
            LineChange::Removed
        };
        debug!(product_id, ?change, "remove_product");

        Ok(self.finish(change))
    }

    /// Empties the cart. The gift goes with it via the eligibility rule.
    pub fn clear(&mut self) -> Mutation {
        let gift_id = self.config.gift_id();
        self.lines.retain(|l| l.id == gift_id);
        debug!("clear");

        self.finish(LineChange::Cleared)
    }

    // =========================================================================
    // Gift Notice
    // =========================================================================

    pub fn gift_notice(&self) -> Option<&GiftNotice> {
        self.notices.current()
    }

    /// Clears the notice if `token` is from the latest grant.
    pub fn expire_notice(&mut self, token: NoticeToken) -> bool {
        let cleared = self.notices.expire(token);
        debug!(generation = token.generation(), cleared, "expire_notice");
        cleared
    }

    /// Clears the notice unconditionally.
    pub fn dismiss_notice(&mut self) -> bool {
        self.notices.dismiss()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Sum of price × quantity over every line. The gift contributes 0.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// `min(subtotal / threshold × 100, 100)` for an arbitrary threshold.
    pub fn progress(&self, threshold: Money) -> f64 {
        self.subtotal().percent_of(threshold)
    }

    /// Progress toward the configured gift threshold.
    pub fn gift_progress(&self) -> f64 {
        self.progress(self.config.threshold)
    }

    /// How much more must be spent to unlock the gift; zero once unlocked.
    pub fn remaining_for_gift(&self) -> Money {
        self.config.threshold.saturating_sub(self.subtotal())
    }

    /// True when the subtotal meets the threshold.
    pub fn gift_unlocked(&self) -> bool {
        self.subtotal() >= self.config.threshold
    }

    /// True when the gift line is in the cart.
    pub fn has_gift(&self) -> bool {
        let gift_id = self.config.gift_id();
        self.lines.iter().any(|l| l.id == gift_id)
    }

    /// The cart lines in display order.
    pub fn snapshot(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == product_id)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines, gift included.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Everything the renderer needs for one frame.
    pub fn view(&self) -> CartView {
        CartView {
            lines: self.lines.clone(),
            subtotal: self.subtotal(),
            threshold: self.config.threshold,
            progress: self.gift_progress(),
            remaining: self.remaining_for_gift(),
            gift_id: self.config.gift_id(),
            gift_unlocked: self.gift_unlocked(),
            notice: self.notices.current().cloned(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn reject_gift(&self, product_id: ProductId) -> CartResult<()> {
        if product_id == self.config.gift_id() {
            warn!(product_id, "rejected direct change to gift line");
            return Err(CartError::GiftLineLocked { id: product_id });
        }
        Ok(())
    }

    fn finish(&mut self, change: LineChange) -> Mutation {
        let gift = self.reconcile_gift();
        Mutation { change, gift }
    }

    /// The eligibility rule. Runs at the end of every mutation.
    fn reconcile_gift(&mut self) -> GiftTransition {
        let subtotal = self.subtotal();
        let threshold = self.config.threshold;
        let has_gift = self.has_gift();

        if subtotal >= threshold && !has_gift {
            self.lines.push(CartLine::from_product(&self.config.gift, 1));
            let token = self.notices.post(&self.config.gift.name);
            info!(
                %subtotal,
                %threshold,
                generation = token.generation(),
                "gift granted"
            );
            GiftTransition::Granted(token)
        } else if subtotal < threshold && has_gift {
            let gift_id = self.config.gift_id();
            self.lines.retain(|l| l.id != gift_id);
            info!(%subtotal, %threshold, "gift revoked");
            GiftTransition::Revoked
        } else {
            GiftTransition::Unchanged
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GIFT_ID;

    const LAPTOP: ProductId = 1;
    const SMARTPHONE: ProductId = 2;
    const HEADPHONES: ProductId = 3;

    fn engine() -> CartEngine {
        CartEngine::new(Catalog::default(), CartConfig::default()).unwrap()
    }

    fn product(engine: &CartEngine, id: ProductId) -> Product {
        engine.catalog().get(id).cloned().unwrap()
    }

    fn add(engine: &mut CartEngine, id: ProductId) -> Mutation {
        let p = product(engine, id);
        engine.add_product(&p).unwrap()
    }

    fn assert_steady(engine: &CartEngine) {
        assert!(engine.snapshot().iter().all(|l| l.quantity > 0));
        let gifts = engine
            .snapshot()
            .iter()
            .filter(|l| l.id == DEFAULT_GIFT_ID)
            .count();
        assert!(gifts <= 1);
        assert_eq!(engine.has_gift(), engine.gift_unlocked());
    }

    #[test]
    fn test_new_cart_is_empty() {
        let engine = engine();
        assert!(engine.is_empty());
        assert_eq!(engine.subtotal(), Money::zero());
        assert_eq!(engine.gift_progress(), 0.0);
        assert!(engine.gift_notice().is_none());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = CartConfig {
            threshold: Money::from_units(-10),
            ..CartConfig::default()
        };
        assert!(CartEngine::new(Catalog::default(), config).is_err());
    }

    #[test]
    fn test_add_appends_then_increments() {
        let mut engine = engine();

        assert_eq!(add(&mut engine, HEADPHONES).change, LineChange::Added);
        assert_eq!(
            add(&mut engine, HEADPHONES).change,
            LineChange::Updated { quantity: 2 }
        );
        assert_eq!(engine.line_count(), 1);
        assert_eq!(engine.line(HEADPHONES).unwrap().quantity, 2);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut engine = engine();
        add(&mut engine, HEADPHONES);
        add(&mut engine, LAPTOP);
        add(&mut engine, HEADPHONES);

        let ids: Vec<ProductId> = engine.snapshot().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![HEADPHONES, LAPTOP]);
    }

    /// Laptop twice reaches the threshold and the gift is appended last.
    #[test]
    fn test_threshold_reached_grants_gift() {
        let mut engine = engine();
        assert_eq!(add(&mut engine, LAPTOP).gift, GiftTransition::Unchanged);

        let mutation = add(&mut engine, LAPTOP);
        assert!(mutation.granted().is_some());
        assert_eq!(engine.subtotal(), Money::from_units(1000));

        let lines = engine.snapshot();
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].id, lines[0].quantity), (LAPTOP, 2));
        assert_eq!((lines[1].id, lines[1].quantity), (DEFAULT_GIFT_ID, 1));
        assert!(lines[1].price.is_zero());

        let notice = engine.gift_notice().unwrap();
        assert_eq!(notice.gift_name, "Wireless Mouse");
        assert_eq!(Some(notice.token), mutation.granted());
        assert_steady(&engine);
    }

    #[test]
    fn test_dropping_below_threshold_revokes_gift() {
        let mut engine = engine();
        add(&mut engine, LAPTOP);
        add(&mut engine, LAPTOP);

        let mutation = engine.change_quantity(LAPTOP, -1).unwrap();
        assert_eq!(mutation.change, LineChange::Updated { quantity: 1 });
        assert_eq!(mutation.gift, GiftTransition::Revoked);
        assert_eq!(engine.snapshot(), &[CartLine::from_product(&product(&engine, LAPTOP), 1)]);
        assert_steady(&engine);
    }

    #[test]
    fn test_below_threshold_progress() {
        let mut engine = engine();
        for _ in 0..9 {
            add(&mut engine, HEADPHONES);
        }

        assert_eq!(engine.subtotal(), Money::from_units(900));
        assert!(!engine.has_gift());
        assert_eq!(engine.progress(Money::from_units(1000)), 90.0);
        assert_eq!(engine.remaining_for_gift(), Money::from_units(100));
    }

    #[test]
    fn test_change_unknown_id_is_noop() {
        let mut engine = engine();
        add(&mut engine, HEADPHONES);
        let before = engine.snapshot().to_vec();

        let mutation = engine.change_quantity(SMARTPHONE, 1).unwrap();
        assert_eq!(mutation.change, LineChange::NotInCart);
        assert_eq!(mutation.gift, GiftTransition::Unchanged);
        assert_eq!(engine.snapshot(), before.as_slice());
    }

    #[test]
    fn test_gift_line_cannot_be_changed_directly() {
        let mut engine = engine();
        add(&mut engine, LAPTOP);
        add(&mut engine, LAPTOP);
        assert!(engine.has_gift());
        let before = engine.snapshot().to_vec();

        for delta in [1, -1, 0] {
            assert_eq!(
                engine.change_quantity(DEFAULT_GIFT_ID, delta),
                Err(CartError::GiftLineLocked { id: DEFAULT_GIFT_ID })
            );
        }
        assert_eq!(
            engine.remove_product(DEFAULT_GIFT_ID),
            Err(CartError::GiftLineLocked { id: DEFAULT_GIFT_ID })
        );
        let gift = engine.config().gift.clone();
        assert!(engine.add_product(&gift).is_err());

        assert_eq!(engine.snapshot(), before.as_slice());
    }

    #[test]
    fn test_zero_delta_never_changes_state() {
        let mut engine = engine();
        add(&mut engine, LAPTOP);
        add(&mut engine, LAPTOP);
        let before = engine.snapshot().to_vec();

        let mutation = engine.change_quantity(LAPTOP, 0).unwrap();
        assert_eq!(mutation.change, LineChange::Unchanged);
        assert_eq!(mutation.gift, GiftTransition::Unchanged);
        assert_eq!(engine.snapshot(), before.as_slice());
    }

    #[test]
    fn test_large_negative_delta_clamps_and_removes() {
        let mut engine = engine();
        add(&mut engine, HEADPHONES);
        add(&mut engine, HEADPHONES);

        let mutation = engine.change_quantity(HEADPHONES, -50).unwrap();
        assert_eq!(mutation.change, LineChange::Removed);
        assert!(engine.is_empty());

        assert_eq!(
            engine.change_quantity(HEADPHONES, i64::MIN).unwrap().change,
            LineChange::NotInCart
        );
    }

    #[test]
    fn test_large_positive_delta_saturates() {
        let mut engine = engine();
        add(&mut engine, HEADPHONES);

        engine.change_quantity(HEADPHONES, i64::MAX).unwrap();
        assert_eq!(engine.line(HEADPHONES).unwrap().quantity, u32::MAX);
        assert_steady(&engine);
    }

    /// Crossing back and forth re-grants and re-revokes every time.
    #[test]
    fn test_repeated_crossing_is_not_latched() {
        let mut engine = engine();
        add(&mut engine, LAPTOP);

        let mut tokens = Vec::new();
        for _ in 0..3 {
            let up = add(&mut engine, LAPTOP);
            tokens.push(up.granted().unwrap());
            assert!(engine.has_gift());

            let down = engine.change_quantity(LAPTOP, -1).unwrap();
            assert_eq!(down.gift, GiftTransition::Revoked);
            assert!(!engine.has_gift());
        }

        assert!(tokens.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_gift_stays_last_while_other_lines_change() {
        let mut engine = engine();
        add(&mut engine, LAPTOP);
        add(&mut engine, LAPTOP);
        let mutation = add(&mut engine, HEADPHONES);
        assert_eq!(mutation.gift, GiftTransition::Unchanged);

        let ids: Vec<ProductId> = engine.snapshot().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![LAPTOP, DEFAULT_GIFT_ID, HEADPHONES]);
        assert_eq!(engine.total_quantity(), 4);
    }

    #[test]
    fn test_remove_product() {
        let mut engine = engine();
        add(&mut engine, LAPTOP);
        add(&mut engine, LAPTOP);
        add(&mut engine, SMARTPHONE);

        let mutation = engine.remove_product(LAPTOP).unwrap();
        assert_eq!(mutation.change, LineChange::Removed);
        assert_eq!(mutation.gift, GiftTransition::Revoked);
        assert_eq!(engine.line_count(), 1);

        assert_eq!(
            engine.remove_product(LAPTOP).unwrap().change,
            LineChange::NotInCart
        );
    }

    #[test]
    fn test_clear_revokes_gift() {
        let mut engine = engine();
        add(&mut engine, LAPTOP);
        add(&mut engine, LAPTOP);

        let mutation = engine.clear();
        assert_eq!(mutation.change, LineChange::Cleared);
        assert_eq!(mutation.gift, GiftTransition::Revoked);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_revoke_leaves_notice_until_expiry() {
        let mut engine = engine();
        add(&mut engine, LAPTOP);
        let token = add(&mut engine, LAPTOP).granted().unwrap();
        engine.change_quantity(LAPTOP, -1).unwrap();

        assert!(engine.gift_notice().is_some());
        assert!(engine.expire_notice(token));
        assert!(engine.gift_notice().is_none());
    }

    #[test]
    fn test_only_latest_grant_expires_notice() {
        let mut engine = engine();
        add(&mut engine, LAPTOP);
        let first = add(&mut engine, LAPTOP).granted().unwrap();
        engine.change_quantity(LAPTOP, -1).unwrap();
        let second = add(&mut engine, LAPTOP).granted().unwrap();

        assert!(!engine.expire_notice(first));
        assert_eq!(engine.gift_notice().unwrap().token, second);
        assert!(engine.expire_notice(second));
    }

    #[test]
    fn test_view_reflects_state() {
        let mut engine = engine();
        add(&mut engine, SMARTPHONE);
        add(&mut engine, SMARTPHONE);

        let view = engine.view();
        assert_eq!(view.subtotal, Money::from_units(600));
        assert_eq!(view.progress, 60.0);
        assert_eq!(view.remaining, Money::from_units(400));
        assert!(!view.gift_unlocked);
        assert_eq!(view.lines.len(), 1);
        assert!(view.notice.is_none());
    }
}
