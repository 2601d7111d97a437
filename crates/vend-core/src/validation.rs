//! # Validation Module
//!
//! Input validation for inventory records and interactive selections.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Inventory file (startup)                                              │
//! │  ├── validate_item_name      → bad line is skipped, load continues     │
//! │  ├── validate_stock_quantity                                           │
//! │  └── validate_unit_price                                               │
//! │                                                                         │
//! │  Interactive session (every purchase)                                  │
//! │  ├── validate_slot_number    → corrective prompt, stage unchanged      │
//! │  └── validate_selection_quantity                                       │
//! │                                                                         │
//! │  A validation failure is never fatal to the session.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::store::SlotStore;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest item name the display will show.
pub const MAX_ITEM_NAME_LEN: usize = 64;

/// Highest unit price the machine accepts, in cents ($10,000.00).
pub const MAX_UNIT_PRICE_CENTS: i64 = 1_000_000;

// =============================================================================
// Inventory Validators
// =============================================================================

/// Validates an item name from the inventory file.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_ITEM_NAME_LEN` characters
///
/// ## Example
/// ```rust
/// use vend_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Cola").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: format!("must be at most {MAX_ITEM_NAME_LEN} characters"),
        });
    }

    Ok(())
}

/// Validates a stock quantity from the inventory file.
///
/// ## Rules
/// - Must be an integer
/// - Must not be negative (zero is allowed and means "skip")
pub fn validate_stock_quantity(text: &str) -> ValidationResult<u32> {
    let quantity: i64 = text.trim().parse().map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    if quantity < 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(quantity).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

/// Validates a unit price from the inventory file.
///
/// ## Rules
/// - Must be a decimal number
/// - Must be non-negative (zero is a free item)
/// - Must not exceed [`MAX_UNIT_PRICE_CENTS`]
///
/// ## Example
/// ```rust
/// use vend_core::validation::validate_unit_price;
///
/// assert_eq!(validate_unit_price("1.25").unwrap().cents(), 125);
/// assert!(validate_unit_price("-1").is_err());
/// assert!(validate_unit_price("cheap").is_err());
/// assert!(validate_unit_price("10000.01").is_err());
/// ```
pub fn validate_unit_price(text: &str) -> ValidationResult<Money> {
    let price = Money::parse(text).map_err(|_| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: "must be a decimal number".to_string(),
    })?;

    if price.is_negative() || price.cents() > MAX_UNIT_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    Ok(price)
}

// =============================================================================
// Interactive Validators
// =============================================================================

/// Validates a slot number typed by the user.
///
/// ## Rules
/// - Must be a whole number
/// - A slot with that number must exist
pub fn validate_slot_number(text: &str, store: &SlotStore) -> ValidationResult<usize> {
    let not_allowed = || ValidationError::NotAllowed {
        field: "slot number".to_string(),
        allowed: store.iter().map(|(number, _)| number.to_string()).collect(),
    };

    let number: usize = text.trim().parse().map_err(|_| not_allowed())?;
    if !store.contains(number) {
        return Err(not_allowed());
    }

    Ok(number)
}

/// Validates a purchase quantity against what the slot holds.
///
/// ## Rules
/// - Must be a whole number
/// - `1 <= quantity <= available`
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  "Please select item quantity (4)!"                                     │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_selection_quantity("5", 4) ← THIS FUNCTION                    │
/// │       │                                                                 │
/// │       ├── not a number?  → "Please select correct item quantity (4)!"   │
/// │       ├── 0 or below?    → same prompt                                  │
/// │       ├── more than 4?   → same prompt                                  │
/// │       │                                                                 │
/// │       └── OK → ask for payment                                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_selection_quantity(text: &str, available: u32) -> ValidationResult<u32> {
    let out_of_range = || ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max: i64::from(available),
    };

    let quantity: i64 = text.trim().parse().map_err(|_| out_of_range())?;
    if quantity < 1 || quantity > i64::from(available) {
        return Err(out_of_range());
    }

    // In range 1..=available, so it fits
    Ok(quantity as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Slot;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Cola").is_ok());
        assert!(validate_item_name("Potato Chips").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert_eq!(validate_stock_quantity("0").unwrap(), 0);
        assert_eq!(validate_stock_quantity(" 23 ").unwrap(), 23);

        assert!(matches!(
            validate_stock_quantity("-1"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_stock_quantity("ten"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_stock_quantity("99999999999").is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert_eq!(validate_unit_price("0").unwrap(), Money::zero());
        assert_eq!(validate_unit_price("1.5").unwrap().cents(), 150);
        assert!(validate_unit_price("-0.05").is_err());
        assert!(validate_unit_price("").is_err());
    }

    #[test]
    fn test_validate_unit_price_upper_bound() {
        assert_eq!(
            validate_unit_price("10000.00").unwrap().cents(),
            MAX_UNIT_PRICE_CENTS
        );
        assert_eq!(
            validate_unit_price("10000.01"),
            Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: MAX_UNIT_PRICE_CENTS,
            })
        );
        assert!(validate_unit_price("92233720368547758.07").is_err());
    }

    #[test]
    fn test_validate_slot_number() {
        let mut store = SlotStore::new();
        store.put(1, Slot::new("Cola", 2, Money::from_cents(100))).unwrap();

        assert_eq!(validate_slot_number("1", &store).unwrap(), 1);
        assert!(validate_slot_number("2", &store).is_err());
        assert!(validate_slot_number("0", &store).is_err());
        assert!(validate_slot_number("-1", &store).is_err());
        assert!(validate_slot_number("one", &store).is_err());
    }

    #[test]
    fn test_validate_selection_quantity() {
        assert_eq!(validate_selection_quantity("1", 4).unwrap(), 1);
        assert_eq!(validate_selection_quantity("4", 4).unwrap(), 4);

        assert!(validate_selection_quantity("0", 4).is_err());
        assert!(validate_selection_quantity("5", 4).is_err());
        assert!(validate_selection_quantity("-1", 4).is_err());
        assert!(validate_selection_quantity("two", 4).is_err());
        // An empty slot accepts nothing
        assert!(validate_selection_quantity("1", 0).is_err());
    }
}
