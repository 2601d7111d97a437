//! Property-based tests for slot packing and payment.
//!
//! These tests use proptest to verify the store's bounds hold across
//! many randomly generated inventories and purchases.

use proptest::prelude::*;
use vend_core::{
    CoreError, Event, Money, Slot, SlotAllocator, SlotStore, Stage, TransactionEngine,
    MAX_ITEM_PER_SLOT, MAX_SLOTS,
};

prop_compose! {
    fn arbitrary_insert()(
        name in prop::sample::select(vec!["Cola", "Chips", "Gum", "Water", "Candy"]),
        quantity in 0u32..40,
        cents in 0i64..1000,
    ) -> (&'static str, u32, Money) {
        (name, quantity, Money::from_cents(cents))
    }
}

proptest! {
    #[test]
    fn slots_never_exceed_bounds(inserts in prop::collection::vec(arbitrary_insert(), 0..20)) {
        let mut store = SlotStore::new();
        let mut allocator = SlotAllocator::new(&mut store);

        for (name, quantity, price) in inserts {
            let _ = allocator.insert(name, quantity, price);
        }

        prop_assert!(store.len() <= MAX_SLOTS);
        for (_, slot) in store.iter() {
            prop_assert!(slot.quantity() <= MAX_ITEM_PER_SLOT);
        }
    }

    #[test]
    fn slot_numbers_are_contiguous(inserts in prop::collection::vec(arbitrary_insert(), 0..20)) {
        let mut store = SlotStore::new();
        let mut allocator = SlotAllocator::new(&mut store);

        for (name, quantity, price) in inserts {
            let _ = allocator.insert(name, quantity, price);
        }

        let numbers: Vec<usize> = store.iter().map(|(n, _)| n).collect();
        let expected: Vec<usize> = (1..=store.len()).collect();
        prop_assert_eq!(numbers, expected);
    }

    #[test]
    fn failure_only_when_store_is_full(inserts in prop::collection::vec(arbitrary_insert(), 0..20)) {
        let mut store = SlotStore::new();
        let mut allocator = SlotAllocator::new(&mut store);
        let mut failed = false;

        for (name, quantity, price) in inserts {
            if let Err(e) = allocator.insert(name, quantity, price) {
                prop_assert_eq!(e, CoreError::SlotCapacityExceeded { max: MAX_SLOTS });
                failed = true;
                break;
            }
        }

        if failed {
            prop_assert_eq!(store.len(), MAX_SLOTS);
        }
    }

    #[test]
    fn fresh_item_is_packed_full_slots_first(quantity in 1u32..=100) {
        let mut store = SlotStore::new();
        SlotAllocator::new(&mut store)
            .insert("Cola", quantity, Money::from_cents(100))
            .unwrap();

        let counts: Vec<u32> = store.iter().map(|(_, s)| s.quantity()).collect();
        let total: u32 = counts.iter().sum();
        prop_assert_eq!(total, quantity);
        prop_assert_eq!(counts.len() as u32, quantity.div_ceil(MAX_ITEM_PER_SLOT));

        let (last, full) = counts.split_last().unwrap();
        prop_assert!(full.iter().all(|q| *q == MAX_ITEM_PER_SLOT));
        prop_assert!(*last >= 1);
    }

    #[test]
    fn change_is_exact_when_paying_with_fives(cents in 1i64..2000, quantity in 1u32..=10) {
        let mut store = SlotStore::new();
        store.put(1, Slot::new("Cola", 10, Money::from_cents(cents))).unwrap();
        let total = Money::from_cents(cents).checked_mul(quantity).unwrap();

        let mut engine = TransactionEngine::new(store);
        engine.settle();
        engine.submit("1");
        engine.submit(&quantity.to_string());

        let mut bills = 0i64;
        while engine.stage() == Stage::CollectPayment {
            engine.submit("5.00");
            bills += 1;
        }

        let events = engine.settle();
        let Some(Event::Vended { receipt }) = events.first() else {
            panic!("expected a vend, got {events:?}");
        };
        prop_assert_eq!(receipt.change, Money::from_cents(bills * 500) - total);
        prop_assert!(receipt.change < Money::from_cents(500));
        prop_assert_eq!(engine.store().get(1).unwrap().quantity(), 10 - quantity);
    }
}
