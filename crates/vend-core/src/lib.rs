//! # vend-core: Pure Business Logic for the Vending Simulator
//!
//! This crate is the **heart** of the simulator. It contains all business
//! logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Vending Simulator Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    vending-cli (console app)                    │   │
//! │  │   inventory file ──► stdin lines ──► stdout prompts             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vend-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ inventory │  │ allocator │  │   store   │  │  engine   │  │   │
//! │  │   │  parsing  │─►│  packing  │─►│   Slots   │◄─│  stages   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STDIN • NO FILES • NO ENVIRONMENT                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Slot, Denomination, VendReceipt)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`store`] - SlotStore, the numbered slots
//! - [`allocator`] - Slot packing for incoming inventory
//! - [`engine`] - The purchase state machine
//! - [`inventory`] - `name|quantity|price` line parsing and loading
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vend_core::{inventory, SlotStore, TransactionEngine};
//!
//! let mut store = SlotStore::new();
//! let report = inventory::load_inventory(&mut store, "Cola|12|1.25\nChips|4|1.75");
//! assert_eq!(report.inserted, 2);
//! assert_eq!(store.len(), 3); // Cola 10, Cola 2, Chips 4
//!
//! let engine = TransactionEngine::new(store);
//! assert!(!engine.is_finished());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocator;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use allocator::SlotAllocator;
pub use engine::{Event, Stage, Transaction, TransactionEngine, Transition};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use store::SlotStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Most units a single slot can hold.
///
/// ## Business Reason
/// The machine holds 100 items: 10 slots of 10.
pub const MAX_ITEM_PER_SLOT: u32 = 10;

/// Most slots the machine has.
pub const MAX_SLOTS: usize = 10;
