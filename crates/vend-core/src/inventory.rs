//! # Inventory Records
//!
//! Parses the `name|quantity|price` inventory format and feeds it to the
//! [`SlotAllocator`].
//!
//! ## Format
//! ```text
//! Cola    | 23 | 1.25
//! Chips   |  6 | 1.75
//! Gum     |  0 | 0.50     ← quantity 0: skipped silently
//! Candy   |  x | 1.00     ← malformed: logged and skipped
//! ```
//!
//! Reading the file is the caller's business; this module only sees text.

use tracing::{info, warn};

use crate::allocator::SlotAllocator;
use crate::error::ValidationError;
use crate::money::Money;
use crate::store::SlotStore;
use crate::validation::{
    validate_item_name, validate_stock_quantity, validate_unit_price, ValidationResult,
};

/// Field separator in inventory lines.
pub const FIELD_SEPARATOR: char = '|';

/// One parsed inventory line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

/// Parses one inventory line.
///
/// ## Returns
/// - `Ok(Some(record))` for a line to insert
/// - `Ok(None)` for a blank line or a quantity of 0
/// - `Err(..)` for a malformed line
///
/// ## Example
/// ```rust
/// use vend_core::inventory::parse_inventory_line;
///
/// let record = parse_inventory_line(" Cola | 23 | 1.25 ").unwrap().unwrap();
/// assert_eq!(record.name, "Cola");
/// assert_eq!(record.quantity, 23);
/// assert_eq!(record.unit_price.cents(), 125);
///
/// assert!(parse_inventory_line("Gum|0|0.50").unwrap().is_none());
/// assert!(parse_inventory_line("Cola|23").is_err());
/// ```
pub fn parse_inventory_line(line: &str) -> ValidationResult<Option<InventoryRecord>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    let [name, quantity, price] = fields.as_slice() else {
        return Err(ValidationError::InvalidFormat {
            field: "inventory line".to_string(),
            reason: format!("expected 3 fields separated by '|', found {}", fields.len()),
        });
    };

    validate_item_name(name)?;
    let quantity = validate_stock_quantity(quantity)?;
    let unit_price = validate_unit_price(price)?;

    if quantity == 0 {
        return Ok(None);
    }

    Ok(Some(InventoryRecord {
        name: name.to_string(),
        quantity,
        unit_price,
    }))
}

/// A line that did not make it into the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number in the input.
    pub line_number: usize,
    pub reason: String,
}

/// What happened to each line of an inventory load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines fully packed into slots.
    pub inserted: usize,
    /// Blank lines and zero-quantity lines.
    pub skipped: usize,
    /// Malformed lines and lines that ran out of slots.
    pub rejected: Vec<RejectedLine>,
}

/// Loads every line of `text` into `store`.
///
/// A bad line is logged and skipped; the rest of the input still loads.
/// A line that runs out of slots may have been partly packed before it
/// failed.
pub fn load_inventory(store: &mut SlotStore, text: &str) -> LoadReport {
    let mut report = LoadReport::default();
    let mut allocator = SlotAllocator::new(store);

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;

        let record = match parse_inventory_line(line) {
            Ok(Some(record)) => record,
            Ok(None) => {
                report.skipped += 1;
                continue;
            }
            Err(e) => {
                warn!(line_number, error = %e, "Skipping malformed inventory line");
                report.rejected.push(RejectedLine {
                    line_number,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match allocator.insert(&record.name, record.quantity, record.unit_price) {
            Ok(slots) => {
                info!(
                    item = %record.name,
                    quantity = record.quantity,
                    price = %record.unit_price,
                    ?slots,
                    "Inserted"
                );
                report.inserted += 1;
            }
            Err(e) => {
                report.rejected.push(RejectedLine {
                    line_number,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

// =============================================================================
// Unit Tests
// =============================================================================
