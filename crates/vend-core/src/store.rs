//! # Slot Store
//!
//! The machine's slots, addressed by a 1-based slot number.
//!
//! ## Numbering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Slot numbers are handed out in order and never reused:                 │
//! │                                                                         │
//! │    [1] Cola 10   [2] Cola 10   [3] Cola 3   [4] Chips 6   ...  [10]     │
//! │                                                                         │
//! │  next_slot_number() = len + 1                                           │
//! │  An empty slot (quantity 0) keeps its number for the whole run.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::types::Slot;
use crate::MAX_SLOTS;

/// Ordered mapping from slot number to [`Slot`], holding at most
/// [`MAX_SLOTS`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotStore {
    slots: BTreeMap<usize, Slot>,
}

impl SlotStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        SlotStore {
            slots: BTreeMap::new(),
        }
    }

    /// Returns the slot at `slot_number`, if any.
    pub fn get(&self, slot_number: usize) -> Option<&Slot> {
        self.slots.get(&slot_number)
    }

    /// Mutable access to the slot at `slot_number`.
    pub fn get_mut(&mut self, slot_number: usize) -> Option<&mut Slot> {
        self.slots.get_mut(&slot_number)
    }

    /// Whether a slot with this number exists.
    pub fn contains(&self, slot_number: usize) -> bool {
        self.slots.contains_key(&slot_number)
    }

    /// The number the next stored slot will get.
    pub fn next_slot_number(&self) -> usize {
        self.slots.len() + 1
    }

    /// Stores `slot` under `slot_number`.
    ///
    /// ## Errors
    /// `SlotCapacityExceeded` if the store already holds `MAX_SLOTS` entries.
    pub fn put(&mut self, slot_number: usize, slot: Slot) -> CoreResult<()> {
        if self.slots.len() >= MAX_SLOTS {
            return Err(CoreError::SlotCapacityExceeded { max: MAX_SLOTS });
        }
        self.slots.insert(slot_number, slot);
        Ok(())
    }

    /// Replaces the slot at `slot_number`, or stores it there if new.
    ///
    /// Replacing never needs capacity; storing a new slot goes through
    /// [`SlotStore::put`].
    pub fn upsert(&mut self, slot_number: usize, slot: Slot) -> CoreResult<()> {
        match self.slots.get_mut(&slot_number) {
            Some(existing) => {
                *existing = slot;
                Ok(())
            }
            None => self.put(slot_number, slot),
        }
    }

    /// Number of the first slot (lowest number) holding `name`.
    pub fn first_slot_named(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .find(|(_, slot)| slot.name() == name)
            .map(|(number, _)| *number)
    }

    /// Slots in slot-number order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Slot)> {
        self.slots.iter().map(|(number, slot)| (*number, slot))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether no more slots can be stored.
    pub fn is_full(&self) -> bool {
        self.slots.len() >= MAX_SLOTS
    }
}

/// One line per slot: `  1: [ Cola, 10, $1.25 ]`.
impl fmt::Display for SlotStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.slots.is_empty() {
            return writeln!(f, "  (empty)");
        }
        for (number, slot) in &self.slots {
            writeln!(f, "  {:>2}: {}", number, slot)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
