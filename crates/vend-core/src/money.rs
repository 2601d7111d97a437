//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Inserting coins as floats:                                             │
//! │    0.10 + 0.10 + 0.10 = 0.30000000000000004  ❌ WRONG!                  │
//! │    3 dimes for a $0.30 item → "not enough money"                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 + 10 + 10 = 30 cents, exactly                                     │
//! │    Change is always exact, no rounding needed at vend time              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vend_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(125); // $1.25
//!
//! // Arithmetic operations
//! let doubled = price.checked_mul(2).unwrap();  // $2.50
//! let total = price + Money::from_cents(500);   // $6.25
//!
//! // Parse user/file input
//! let parsed = Money::parse("1.25").unwrap();
//! assert_eq!(parsed, price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values when computing shortfalls
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for receipts
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Slot.unit_price ──► × quantity ──► total price                         │
/// │                                          │                              │
/// │  Denomination.value() ──► amount inserted ──► ≥ total? ──► change       │
/// │                                                                         │
/// │  EVERY monetary value in the machine flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses decimal text into money, rounding sub-cent digits half-up.
    ///
    /// ## Accepted Forms
    /// `"1"`, `"1."`, `"1.5"`, `"1.50"`, `".25"`, `"+2.00"`, `"-0.05"`.
    /// Surrounding whitespace is ignored.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// assert_eq!(Money::parse("1.25").unwrap().cents(), 125);
    /// assert_eq!(Money::parse("0.125").unwrap().cents(), 13);
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        parse_decimal(text, false)
    }

    /// Parses decimal text into money, rejecting sub-cent precision.
    ///
    /// Trailing zeros past the cents are fine (`"0.250"`), anything else
    /// (`"0.104"`) is an error rather than being rounded into a valid coin.
    pub fn parse_exact(text: &str) -> Result<Self, ValidationError> {
        parse_decimal(text, true)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.dollars(), 10);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a quantity, or `None` if the product does not fit.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(175); // $1.75
    /// assert_eq!(unit_price.checked_mul(2), Some(Money::from_cents(350)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Slot 3: Chips $1.75
    /// Quantity: 2
    ///      │
    ///      ▼
    /// checked_mul(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// "Total price is $3.50"
    /// ```
    #[inline]
    pub fn checked_mul(&self, qty: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(qty)).map(Money)
    }
}

/// Shared parser behind [`Money::parse`] and [`Money::parse_exact`].
fn parse_decimal(text: &str, exact: bool) -> Result<Money, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: reason.to_string(),
    };

    let text = text.trim();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("must be a decimal number"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("must be a decimal number"));
    }

    let major: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("amount is too large"))?
    };

    // First two fractional digits are cents, the rest only matter for rounding
    let digits = fraction.as_bytes();
    let digit = |i: usize| digits.get(i).map(|d| i64::from(d - b'0')).unwrap_or(0);
    let mut minor = digit(0) * 10 + digit(1);

    let rest = digits.get(2..).unwrap_or(&[]);
    if exact {
        if rest.iter().any(|d| *d != b'0') {
            return Err(invalid("must not have more than two decimal places"));
        }
    } else if rest.first().is_some_and(|d| *d >= b'5') {
        minor += 1;
    }

    let cents = major
        .checked_mul(100)
        .and_then(|c| c.checked_add(minor))
        .ok_or_else(|| invalid("amount is too large"))?;

    Ok(Money(if negative { -cents } else { cents }))
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money the way the machine prints it: `$1.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(150)), "$1.50");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let mut running = Money::zero();
        running += Money::from_cents(25);
        running += Money::from_cents(25);
        running -= Money::from_cents(5);
        assert_eq!(running.cents(), 45);
    }

    /// Three dimes must be exactly thirty cents.
    #[test]
    fn test_coin_accumulation_is_exact() {
        let dime = Money::parse("0.10").unwrap();
        let total = dime + dime + dime;
        assert_eq!(total, Money::from_cents(30));
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(Money::parse("1").unwrap().cents(), 100);
        assert_eq!(Money::parse("1.").unwrap().cents(), 100);
        assert_eq!(Money::parse("1.5").unwrap().cents(), 150);
        assert_eq!(Money::parse("1.50").unwrap().cents(), 150);
        assert_eq!(Money::parse(".25").unwrap().cents(), 25);
        assert_eq!(Money::parse("  5.00 ").unwrap().cents(), 500);
        assert_eq!(Money::parse("+2").unwrap().cents(), 200);
        assert_eq!(Money::parse("-0.05").unwrap().cents(), -5);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1e2").is_err());
        assert!(Money::parse("quit").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_rounds_half_up() {
        assert_eq!(Money::parse("0.125").unwrap().cents(), 13);
        assert_eq!(Money::parse("0.124").unwrap().cents(), 12);
        assert_eq!(Money::parse("1.999").unwrap().cents(), 200);
    }

    #[test]
    fn test_parse_exact() {
        assert_eq!(Money::parse_exact("0.250").unwrap().cents(), 25);
        assert!(Money::parse_exact("0.104").is_err());
        assert!(Money::parse_exact("0.105").is_err());
    }

    #[test]
    fn test_zero_and_sign() {
        let zero = Money::zero();
        assert!(!zero.is_negative());
        assert!(Money::from_cents(-100).is_negative());
        assert_eq!(Money::default(), zero);
    }

    #[test]
    fn test_checked_mul() {
        let unit_price = Money::from_cents(175);
        assert_eq!(unit_price.checked_mul(2), Some(Money::from_cents(350)));
        assert_eq!(unit_price.checked_mul(0), Some(Money::zero()));
        assert_eq!(Money::from_cents(i64::MAX / 2 + 1).checked_mul(2), None);
    }
}
