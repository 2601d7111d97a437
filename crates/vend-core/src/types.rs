//! # Domain Types
//!
//! Core domain types used throughout the vending simulator.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Slot       │   │  Denomination   │   │   VendReceipt   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  Nickel   0.05  │   │  id (UUID)      │       │
//! │  │  quantity 0..10 │   │  Dime     0.10  │   │  slot_number    │       │
//! │  │  unit_price     │   │  Quarter  0.25  │   │  quantity       │       │
//! │  └─────────────────┘   │  Dollar   1.00  │   │  change         │       │
//! │                        │  FiveDollar 5.00│   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Slot
// =============================================================================

/// A single inventory cell: one item name, a quantity on hand, a unit price.
///
/// Name and price are fixed at construction. The quantity is a plain
/// counter; keeping it within `0..=MAX_ITEM_PER_SLOT` is the allocator's job,
/// not the slot's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    name: String,
    quantity: u32,
    unit_price: Money,
}

impl Slot {
    /// Creates a slot holding `quantity` units of `name` at `unit_price`.
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: Money) -> Self {
        Slot {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Item name shown on the machine.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units currently on hand.
    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of one unit.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Sets the quantity on hand (absolute).
    #[inline]
    pub fn set(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Adjusts the quantity on hand by `delta` (relative).
    ///
    /// Returns the new quantity, or `None` with the slot untouched if the
    /// count would go below zero or past `u32::MAX`.
    #[inline]
    pub fn add(&mut self, delta: i32) -> Option<u32> {
        let quantity = self.quantity.checked_add_signed(delta)?;
        self.quantity = quantity;
        Some(quantity)
    }

    /// Whether nothing can be bought from this slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {}, {}, {} ]", self.name, self.quantity, self.unit_price)
    }
}

// =============================================================================
// Denomination
// =============================================================================

/// The coins and bills the machine accepts.
///
/// Anything else is refused outright: there is no partial credit for an
/// unrecognized coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Denomination {
    /// $0.05
    Nickel,
    /// $0.10
    Dime,
    /// $0.25
    Quarter,
    /// $1.00
    Dollar,
    /// $5.00
    FiveDollar,
}

impl Denomination {
    /// Every accepted denomination, smallest first.
    pub const ALL: [Denomination; 5] = [
        Denomination::Nickel,
        Denomination::Dime,
        Denomination::Quarter,
        Denomination::Dollar,
        Denomination::FiveDollar,
    ];

    /// Face value.
    pub const fn value(&self) -> Money {
        match self {
            Denomination::Nickel => Money::from_cents(5),
            Denomination::Dime => Money::from_cents(10),
            Denomination::Quarter => Money::from_cents(25),
            Denomination::Dollar => Money::from_cents(100),
            Denomination::FiveDollar => Money::from_cents(500),
        }
    }

    /// Looks up the denomination with exactly this face value.
    pub fn from_money(amount: Money) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.value() == amount)
    }

    /// Parses what the user typed into a denomination.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::types::Denomination;
    ///
    /// assert_eq!(Denomination::parse("0.25"), Some(Denomination::Quarter));
    /// assert_eq!(Denomination::parse("5"), Some(Denomination::FiveDollar));
    /// assert_eq!(Denomination::parse("0.50"), None);
    /// assert_eq!(Denomination::parse("coin"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    /// The accepted set as the machine lists it: `$0.05, $0.10, ...`.
    pub fn accepted_list() -> String {
        Self::ALL
            .iter()
            .map(|d| d.value().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Denomination {
    type Err = CoreError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Money::parse_exact(text)
            .ok()
            .and_then(Self::from_money)
            .ok_or_else(|| CoreError::InvalidDenomination(text.trim().to_string()))
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// =============================================================================
// Vend Receipt
// =============================================================================

/// Record of one completed purchase.
/// Uses snapshot pattern to freeze the slot's name and price at vend time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendReceipt {
    pub id: Uuid,
    pub slot_number: usize,
    /// Item name at time of vend (frozen).
    pub item_name: String,
    pub quantity: u32,
    /// Unit price at time of vend (frozen).
    pub unit_price: Money,
    /// unit_price × quantity.
    pub total_price: Money,
    /// Everything the customer inserted.
    pub tendered: Money,
    /// tendered − total_price, never negative.
    pub change: Money,
    pub vended_at: DateTime<Utc>,
}

impl VendReceipt {
    /// Builds a receipt for `quantity` units taken from `slot`.
    ///
    /// Fails with `TotalOverflow` if the total price does not fit.
    pub fn new(
        slot_number: usize,
        slot: &Slot,
        quantity: u32,
        tendered: Money,
    ) -> CoreResult<Self> {
        let total_price = slot
            .unit_price()
            .checked_mul(quantity)
            .ok_or(CoreError::TotalOverflow {
                slot: slot_number,
                quantity,
            })?;
        Ok(VendReceipt {
            id: Uuid::new_v4(),
            slot_number,
            item_name: slot.name().to_string(),
            quantity,
            unit_price: slot.unit_price(),
            total_price,
            tendered,
            change: tendered - total_price,
            vended_at: Utc::now(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_set_and_add() {
        let mut slot = Slot::new("Cola", 5, Money::from_cents(125));
        slot.set(10);
        assert_eq!(slot.quantity(), 10);

        assert_eq!(slot.add(-3), Some(7));
        assert_eq!(slot.add(2), Some(9));
        assert_eq!(slot.add(-9), Some(0));
        assert!(slot.is_empty());
    }

    #[test]
    fn test_slot_add_below_zero_leaves_quantity() {
        let mut slot = Slot::new("Cola", 3, Money::from_cents(125));
        assert_eq!(slot.add(-4), None);
        assert_eq!(slot.quantity(), 3);
    }

    #[test]
    fn test_slot_display() {
        let slot = Slot::new("Chips", 3, Money::from_cents(175));
        assert_eq!(slot.to_string(), "[ Chips, 3, $1.75 ]");
    }

    #[test]
    fn test_denomination_values() {
        let cents: Vec<i64> = Denomination::ALL.iter().map(|d| d.value().cents()).collect();
        assert_eq!(cents, vec![5, 10, 25, 100, 500]);
    }

    #[test]
    fn test_denomination_parse() {
        assert_eq!(Denomination::parse("0.05"), Some(Denomination::Nickel));
        assert_eq!(Denomination::parse("0.1"), Some(Denomination::Dime));
        assert_eq!(Denomination::parse(".25"), Some(Denomination::Quarter));
        assert_eq!(Denomination::parse("1.00"), Some(Denomination::Dollar));
        assert_eq!(Denomination::parse(" 5.00 "), Some(Denomination::FiveDollar));

        assert_eq!(Denomination::parse("0.50"), None);
        assert_eq!(Denomination::parse("0.104"), None);
        assert_eq!(Denomination::parse("-1.00"), None);
        assert_eq!(Denomination::parse(""), None);
    }

    #[test]
    fn test_denomination_from_str_error() {
        let err = "0.50".parse::<Denomination>().unwrap_err();
        assert_eq!(err, CoreError::InvalidDenomination("0.50".to_string()));
        assert_eq!("1".parse::<Denomination>(), Ok(Denomination::Dollar));
    }

    #[test]
    fn test_accepted_list() {
        assert_eq!(
            Denomination::accepted_list(),
            "$0.05, $0.10, $0.25, $1.00, $5.00"
        );
    }

    #[test]
    fn test_receipt_computes_change() {
        let slot = Slot::new("Water", 4, Money::from_cents(175));
        let receipt = VendReceipt::new(2, &slot, 2, Money::from_cents(500)).unwrap();

        assert_eq!(receipt.item_name, "Water");
        assert_eq!(receipt.total_price.cents(), 350);
        assert_eq!(receipt.change.cents(), 150);
        assert_eq!(receipt.slot_number, 2);
    }

    #[test]
    fn test_receipt_rejects_overflowing_total() {
        let slot = Slot::new("Gold", 2, Money::from_cents(i64::MAX / 2 + 1));
        let err = VendReceipt::new(1, &slot, 2, Money::zero()).unwrap_err();
        assert_eq!(err, CoreError::TotalOverflow { slot: 1, quantity: 2 });
    }
}
