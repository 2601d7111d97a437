//! # Slot Allocator
//!
//! Packs an incoming `(name, quantity, price)` into capacity-limited slots.
//!
//! ## Packing Walkthrough
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert("Cola", 23, $1.00) into an empty store                          │
//! │                                                                         │
//! │  1. First slot named "Cola"?  none → new slot, combined = 23            │
//! │  2. combined ≥ 10             → cap new slot at 10, store as [1]        │
//! │                                 combined = 13                           │
//! │  3. combined > 0              → [2] Cola 10, combined = 3               │
//! │     combined > 0              → [3] Cola 3,  combined = -7              │
//! │                                                                         │
//! │  Result: [1] 10  [2] 10  [3] 3                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Limitation: First Match Only
//! Only the **first** slot with the incoming name takes part in the merge.
//! Spillover slots from an earlier insert are never topped up, and when the
//! first match plus the new quantity stays under a full slot, the combined
//! count goes to a brand-new slot while the matched slot keeps its own
//! count. Changing this would change the slot layout users see, so it is
//! kept as-is.

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::store::SlotStore;
use crate::types::Slot;
use crate::MAX_ITEM_PER_SLOT;

/// Fills a [`SlotStore`] with inventory.
///
/// ## Usage
/// ```rust
/// use vend_core::{Money, SlotAllocator, SlotStore};
///
/// let mut store = SlotStore::new();
/// let written = SlotAllocator::new(&mut store)
///     .insert("Cola", 23, Money::from_cents(100))
///     .unwrap();
///
/// assert_eq!(written, vec![1, 2, 3]);
/// assert_eq!(store.get(3).unwrap().quantity(), 3);
/// ```
#[derive(Debug)]
pub struct SlotAllocator<'a> {
    store: &'a mut SlotStore,
}

impl<'a> SlotAllocator<'a> {
    pub fn new(store: &'a mut SlotStore) -> Self {
        SlotAllocator { store }
    }

    /// Packs `quantity` units of `name` into the store.
    ///
    /// ## Returns
    /// The slot numbers written, in order. Inserting zero units writes
    /// nothing.
    ///
    /// ## Errors
    /// `SlotCapacityExceeded` as soon as one more slot is needed than the
    /// store can hold. Slots written before that point are **not** rolled
    /// back.
    pub fn insert(&mut self, name: &str, quantity: u32, unit_price: Money) -> CoreResult<Vec<usize>> {
        let capacity = i64::from(MAX_ITEM_PER_SLOT);
        let mut written = Vec::new();

        if quantity == 0 {
            return Ok(written);
        }

        // Step 1: merge with the first slot of the same name, if any
        let matched = self.store.first_slot_named(name);
        let (mut slot, mut combined) = match matched.and_then(|n| self.store.get(n)) {
            Some(existing) => {
                let combined = i64::from(existing.quantity()) + i64::from(quantity);
                (existing.clone(), combined)
            }
            None => (Slot::new(name, quantity, unit_price), i64::from(quantity)),
        };
        debug!(item = name, quantity, ?matched, combined, "Packing inventory");

        // Step 2: fill the matched-or-new slot to the brim
        if combined >= capacity {
            slot.set(MAX_ITEM_PER_SLOT);
            let number = match matched {
                Some(number) => number,
                None => self.store.next_slot_number(),
            };
            self.store
                .upsert(number, slot)
                .map_err(|e| self.capacity_exhausted(name, e))?;
            written.push(number);
            combined -= capacity;
        }

        // Step 3: overflow into fresh slots
        while combined > 0 {
            let number = self.store.next_slot_number();
            // combined > 0 here, so the cast cannot wrap
            let fill = combined.min(capacity) as u32;
            self.store
                .put(number, Slot::new(name, fill, unit_price))
                .map_err(|e| self.capacity_exhausted(name, e))?;
            written.push(number);
            combined -= capacity;
        }

        debug!(item = name, slots = ?written, "Inventory packed");
        Ok(written)
    }

    /// [`insert`](Self::insert) with a plain success flag.
    pub fn insert_checked(&mut self, name: &str, quantity: u32, unit_price: Money) -> bool {
        self.insert(name, quantity, unit_price).is_ok()
    }

    fn capacity_exhausted(&self, name: &str, error: CoreError) -> CoreError {
        warn!(
            item = name,
            slots = self.store.len(),
            error = %error,
            "No slot left for inventory"
        );
        error
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_SLOTS;

    fn dollar() -> Money {
        Money::from_cents(100)
    }

    fn quantities(store: &SlotStore) -> Vec<u32> {
        store.iter().map(|(_, slot)| slot.quantity()).collect()
    }

    #[test]
    fn test_small_quantity_takes_one_slot() {
        let mut store = SlotStore::new();
        let written = SlotAllocator::new(&mut store).insert("Gum", 4, dollar()).unwrap();

        assert_eq!(written, vec![1]);
        assert_eq!(quantities(&store), vec![4]);
        assert_eq!(store.get(1).unwrap().unit_price(), dollar());
    }

    #[test]
    fn test_twenty_three_units_pack_into_three_slots() {
        let mut store = SlotStore::new();
        SlotAllocator::new(&mut store).insert("X", 23, dollar()).unwrap();

        assert_eq!(quantities(&store), vec![10, 10, 3]);
        assert!(store.iter().all(|(_, slot)| slot.name() == "X"));
    }

    #[test]
    fn test_exact_multiple_leaves_no_partial_slot() {
        let mut store = SlotStore::new();
        SlotAllocator::new(&mut store).insert("X", 20, dollar()).unwrap();

        assert_eq!(quantities(&store), vec![10, 10]);
    }

    #[test]
    fn test_merge_fills_first_match_then_overflows() {
        let mut store = SlotStore::new();
        let mut allocator = SlotAllocator::new(&mut store);
        allocator.insert("Cola", 6, dollar()).unwrap();
        allocator.insert("Chips", 2, dollar()).unwrap();

        // 6 + 7 = 13: slot 1 capped at 10, 3 spill into slot 3
        let written = allocator.insert("Cola", 7, Money::from_cents(150)).unwrap();
        assert_eq!(written, vec![1, 3]);
        assert_eq!(quantities(&store), vec![10, 2, 3]);

        // The matched slot keeps its original price, spillover gets the new one
        assert_eq!(store.get(1).unwrap().unit_price(), dollar());
        assert_eq!(store.get(3).unwrap().unit_price(), Money::from_cents(150));
    }

    #[test]
    fn test_merge_only_considers_first_slot() {
        let mut store = SlotStore::new();
        let mut allocator = SlotAllocator::new(&mut store);
        allocator.insert("Cola", 13, dollar()).unwrap(); // [10, 3]

        // First Cola slot is already full: all 4 go to a new slot,
        // the spare room in slot 2 is not used.
        allocator.insert("Cola", 4, dollar()).unwrap();
        assert_eq!(quantities(&store), vec![10, 3, 4]);
    }

    #[test]
    fn test_merge_below_capacity_opens_new_slot_with_combined_count() {
        let mut store = SlotStore::new();
        let mut allocator = SlotAllocator::new(&mut store);
        allocator.insert("Cola", 3, dollar()).unwrap();
        allocator.insert("Cola", 2, dollar()).unwrap();

        assert_eq!(quantities(&store), vec![3, 5]);
    }

    #[test]
    fn test_zero_quantity_writes_nothing() {
        let mut store = SlotStore::new();
        let written = SlotAllocator::new(&mut store).insert("Gum", 0, dollar()).unwrap();
        assert!(written.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_capacity_exhaustion_keeps_partial_slots() {
        let mut store = SlotStore::new();
        let mut allocator = SlotAllocator::new(&mut store);
        for i in 0..8 {
            allocator.insert(&format!("Item{i}"), 1, dollar()).unwrap();
        }

        // Needs 3 slots, only 2 left
        let err = allocator.insert("Big", 25, dollar()).unwrap_err();
        assert_eq!(err, CoreError::SlotCapacityExceeded { max: MAX_SLOTS });
        assert_eq!(store.len(), MAX_SLOTS);
        assert_eq!(store.get(9).unwrap().name(), "Big");
        assert_eq!(store.get(10).unwrap().quantity(), 10);
    }

    #[test]
    fn test_eleventh_distinct_item_is_rejected() {
        let mut store = SlotStore::new();
        let mut allocator = SlotAllocator::new(&mut store);
        for i in 0..MAX_SLOTS {
            assert!(allocator.insert_checked(&format!("Item{i}"), 5, dollar()));
        }
        assert!(!allocator.insert_checked("OneTooMany", 5, dollar()));
        assert_eq!(store.len(), MAX_SLOTS);
    }

    #[test]
    fn test_new_item_of_ten_on_full_store_fails() {
        let mut store = SlotStore::new();
        let mut allocator = SlotAllocator::new(&mut store);
        for i in 0..MAX_SLOTS {
            allocator.insert(&format!("Item{i}"), 5, dollar()).unwrap();
        }

        // Capping the new slot at 10 already needs an 11th slot
        let err = allocator.insert("Fresh", 10, dollar()).unwrap_err();
        assert_eq!(err, CoreError::SlotCapacityExceeded { max: MAX_SLOTS });
        assert_eq!(store.len(), MAX_SLOTS);
        assert_eq!(store.first_slot_named("Fresh"), None);
        assert_eq!(quantities(&store), vec![5; MAX_SLOTS]);
    }

    #[test]
    fn test_full_store_still_merges_into_first_match() {
        let mut store = SlotStore::new();
        let mut allocator = SlotAllocator::new(&mut store);
        for i in 0..MAX_SLOTS {
            allocator.insert(&format!("Item{i}"), 5, dollar()).unwrap();
        }

        // 5 + 5 = 10 exactly: slot 1 is topped up in place, nothing overflows
        assert!(allocator.insert_checked("Item0", 5, dollar()));
        assert_eq!(store.get(1).unwrap().quantity(), 10);
    }
}
