//! Property tests: cart invariants over random operation sequences.

use giftcart_core::config::DEFAULT_GIFT_ID;
use giftcart_core::{CartConfig, CartEngine, CartError, Catalog, Money, ProductId};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(ProductId),
    Change(ProductId, i64),
    Remove(ProductId),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    // 42 is never in the catalog; 99 is the gift.
    let id = prop_oneof![1u32..=4, Just(42u32), Just(DEFAULT_GIFT_ID)];
    prop_oneof![
        6 => (1u32..=4).prop_map(Op::Add),
        6 => (id.clone(), -3i64..=3).prop_map(|(id, d)| Op::Change(id, d)),
        1 => id.prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

fn apply(engine: &mut CartEngine, op: &Op) -> Result<(), CartError> {
    match *op {
        Op::Add(id) => {
            let product = engine.catalog().get(id).cloned().expect("catalog id");
            engine.add_product(&product).map(|_| ())
        }
        Op::Change(id, delta) => engine.change_quantity(id, delta).map(|_| ()),
        Op::Remove(id) => engine.remove_product(id).map(|_| ()),
        Op::Clear => {
            engine.clear();
            Ok(())
        }
    }
}

fn fresh() -> CartEngine {
    CartEngine::new(Catalog::default(), CartConfig::default()).expect("valid defaults")
}

proptest! {
    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(op(), 0..60)) {
        let mut engine = fresh();

        for op in &ops {
            let before = engine.snapshot().to_vec();
            let result = apply(&mut engine, op);

            if result.is_err() {
                // Only the gift id is ever rejected, and rejection changes nothing.
                let gift_rejected = matches!(
                    result,
                    Err(CartError::GiftLineLocked { id }) if id == DEFAULT_GIFT_ID
                );
                prop_assert!(gift_rejected, "unexpected error: {:?}", result);
                prop_assert_eq!(engine.snapshot(), before.as_slice());
            }

            let lines = engine.snapshot();
            prop_assert!(lines.iter().all(|l| l.quantity > 0));
            prop_assert!(lines.iter().filter(|l| l.id == DEFAULT_GIFT_ID).count() <= 1);

            let recomputed: Money = lines.iter().map(|l| l.price * l.quantity).sum();
            prop_assert_eq!(recomputed, engine.subtotal());

            prop_assert_eq!(engine.has_gift(), engine.subtotal() >= Money::from_units(1000));

            let progress = engine.gift_progress();
            prop_assert!((0.0..=100.0).contains(&progress));
        }
    }

    #[test]
    fn zero_delta_is_idempotent(
        ops in prop::collection::vec(op(), 0..30),
        id in prop_oneof![1u32..=4, Just(42u32)],
    ) {
        let mut engine = fresh();
        for op in &ops {
            let _ = apply(&mut engine, op);
        }

        let before = engine.snapshot().to_vec();
        let notice_before = engine.gift_notice().cloned();
        engine.change_quantity(id, 0).expect("non-gift id");

        prop_assert_eq!(engine.snapshot(), before.as_slice());
        prop_assert_eq!(engine.gift_notice().cloned(), notice_before);
    }

    #[test]
    fn line_ids_are_unique(ops in prop::collection::vec(op(), 0..60)) {
        let mut engine = fresh();
        for op in &ops {
            let _ = apply(&mut engine, op);
        }

        let mut ids: Vec<ProductId> = engine.snapshot().iter().map(|l| l.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }
}

// =============================================================================
// Walkthrough scenarios
// =============================================================================

#[test]
fn laptop_twice_then_once_back() {
    let mut engine = fresh();
    let laptop = engine.catalog().get(1).cloned().unwrap();

    engine.add_product(&laptop).unwrap();
    engine.add_product(&laptop).unwrap();
    assert_eq!(engine.subtotal(), Money::from_units(1000));
    let lines = engine.snapshot();
    assert_eq!(lines.len(), 2);
    assert_eq!((lines[0].id, lines[0].quantity), (1, 2));
    assert_eq!((lines[1].id, lines[1].quantity), (DEFAULT_GIFT_ID, 1));

    engine.change_quantity(1, -1).unwrap();
    assert_eq!(engine.subtotal(), Money::from_units(500));
    let lines = engine.snapshot();
    assert_eq!(lines.len(), 1);
    assert_eq!((lines[0].id, lines[0].quantity), (1, 1));
}

#[test]
fn nine_headphones_stay_below_threshold() {
    let mut engine = fresh();
    let headphones = engine.catalog().get(3).cloned().unwrap();

    for _ in 0..9 {
        engine.add_product(&headphones).unwrap();
    }

    assert_eq!(engine.subtotal(), Money::from_units(900));
    assert!(!engine.has_gift());
    assert_eq!(engine.progress(Money::from_units(1000)), 90.0);
}

#[test]
fn gift_increment_rejected_while_present() {
    let mut engine = fresh();
    let laptop = engine.catalog().get(1).cloned().unwrap();
    engine.add_product(&laptop).unwrap();
    engine.add_product(&laptop).unwrap();
    let before = engine.snapshot().to_vec();

    assert!(engine.change_quantity(DEFAULT_GIFT_ID, 1).is_err());
    assert_eq!(engine.snapshot(), before.as_slice());
}
