//! # Error Types
//!
//! Domain-specific error types for vend-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vend-core errors (this file)                                          │
//! │  ├── CoreError        - Slot store / allocator / vend failures         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vending-cli errors (app crate)                                        │
//! │  ├── SessionError     - Fatal console failures (ends the session)      │
//! │  └── AppError         - Startup failures (config, inventory file)      │
//! │                                                                         │
//! │  ValidationError → corrective prompt, or a rejected inventory line     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recoverable vs Fatal
//! A `ValidationError` is always recoverable: the engine turns a bad slot,
//! quantity or coin into a corrective prompt and stays where it is. A
//! `CoreError` raised mid-purchase moves the engine to `Stage::Failed`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The slot store is full.
    ///
    /// ## When This Occurs
    /// - The allocator needs one more slot than `MAX_SLOTS` allows
    /// - `SlotStore::put` is called on a full store
    ///
    /// Slots written before the failure stay written.
    #[error("Vending machine cannot hold more than {max} slots")]
    SlotCapacityExceeded { max: usize },

    /// Slot number is not in the store.
    #[error("Slot not found: {0}")]
    SlotNotFound(usize),

    /// Slot does not hold enough items for the requested quantity.
    #[error("Insufficient quantity in slot {slot}: available {available}, requested {requested}")]
    InsufficientQuantity {
        slot: usize,
        available: u32,
        requested: u32,
    },

    /// Inserted value is not one of the accepted coins or bills.
    #[error("Invalid denomination: {0}")]
    InvalidDenomination(String),

    /// Unit price × quantity does not fit in `Money`.
    #[error("Total price overflows for slot {slot} at quantity {quantity}")]
    TotalOverflow { slot: usize, quantity: u32 },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user or file input doesn't meet requirements.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric quantity, wrong field count).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientQuantity {
            slot: 3,
            available: 2,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient quantity in slot 3: available 2, requested 5"
        );

        let err = CoreError::SlotCapacityExceeded { max: 10 };
        assert_eq!(
            err.to_string(),
            "Vending machine cannot hold more than 10 slots"
        );

        let err = CoreError::TotalOverflow {
            slot: 1,
            quantity: 2,
        };
        assert_eq!(
            err.to_string(),
            "Total price overflows for slot 1 at quantity 2"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 4,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 4");
    }
}
