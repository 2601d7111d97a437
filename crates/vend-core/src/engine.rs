//! # Transaction Engine
//!
//! The purchase state machine: one user, one purchase at a time.
//!
//! ## Stages
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌─────────┐   ┌────────────┐   ┌────────────────┐   ┌──────────────┐ │
//! │   │ Display │──►│ SelectSlot │──►│ SelectQuantity │──►│CollectPayment│ │
//! │   └────▲────┘   └─────┬──────┘   └───────┬────────┘   └──────┬───────┘ │
//! │        │              │ bad slot         │ bad qty           │ bad coin │
//! │        │              ▼ (retry)          ▼ (retry)           ▼ (retry)  │
//! │        │                                                     │ paid     │
//! │        │             ┌──────┐                                │ enough   │
//! │        └─────────────│ Vend │◄───────────────────────────────┘          │
//! │                      └──────┘                                           │
//! │                                                                         │
//! │   "quit" at any input stage ──► Quit (terminal)                         │
//! │   unexpected failure         ──► Failed (terminal)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Driving the Engine
//! The engine does no I/O. Stages that need a line from the user report
//! `awaits_input()`; feed them with [`TransactionEngine::submit`]. The
//! other stages run with [`TransactionEngine::advance`]. Every call returns
//! the [`Event`]s the user should see.
//!
//! ```rust
//! use vend_core::{Money, Slot, SlotStore, Stage, TransactionEngine};
//!
//! let mut store = SlotStore::new();
//! store.put(1, Slot::new("Cola", 5, Money::from_cents(100))).unwrap();
//!
//! let mut engine = TransactionEngine::new(store);
//! engine.settle();                   // shows the menu
//! engine.submit("1");                // slot
//! engine.submit("2");                // quantity
//! engine.submit("1.00");
//! engine.submit("1.00");             // paid in full
//! engine.settle();                   // vends, back to the menu
//!
//! assert_eq!(engine.stage(), Stage::SelectSlot);
//! assert_eq!(engine.store().get(1).unwrap().quantity(), 3);
//! ```

use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::store::SlotStore;
use crate::types::{Denomination, Slot, VendReceipt};
use crate::validation::{validate_selection_quantity, validate_slot_number};

/// The token that ends the session from any input stage.
pub const QUIT_COMMAND: &str = "quit";

// =============================================================================
// Stage
// =============================================================================

/// Where the current purchase stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Show the machine's contents.
    Display,
    /// Waiting for a slot number.
    SelectSlot,
    /// Waiting for a quantity.
    SelectQuantity,
    /// Waiting for coins or bills.
    CollectPayment,
    /// Paid in full, ready to hand out the items.
    Vend,
    /// The user quit. Terminal.
    Quit,
    /// An unexpected failure ended the session. Terminal.
    Failed,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Display => "display",
            Stage::SelectSlot => "select_slot",
            Stage::SelectQuantity => "select_quantity",
            Stage::CollectPayment => "collect_payment",
            Stage::Vend => "vend",
            Stage::Quit => "quit",
            Stage::Failed => "failed",
        }
    }

    /// Whether this stage needs a line from the user to move on.
    pub fn awaits_input(&self) -> bool {
        matches!(
            self,
            Stage::SelectSlot | Stage::SelectQuantity | Stage::CollectPayment
        )
    }

    /// Whether the session is over.
    pub fn is_final(&self) -> bool {
        matches!(self, Stage::Quit | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// The purchase in progress. Reset after every vend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    /// Slot number the user picked.
    pub selected_slot: Option<usize>,
    /// How many units the user asked for.
    pub selected_quantity: u32,
    /// Sum of every accepted coin and bill.
    pub amount_inserted: Money,
}

// =============================================================================
// Event
// =============================================================================

/// Something the user should see.
///
/// `Display` renders the console text for each event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The machine's contents, in slot order.
    Menu { slots: Vec<(usize, Slot)> },
    SlotSelected { slot_number: usize, item_name: String },
    InvalidSlot,
    QuantityPrompt { available: u32 },
    InvalidQuantity { available: u32 },
    QuantitySelected { quantity: u32 },
    PaymentPrompt { total: Money },
    InvalidDenomination,
    Inserted { denomination: Denomination, total_inserted: Money },
    Vended { receipt: VendReceipt },
    Quit { returned: Money },
    /// Generic failure; the reason is for logs, not for the user.
    Failed { reason: String },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "==================================================";
        match self {
            Event::Menu { slots } => {
                writeln!(f, "\n\n{RULE}")?;
                writeln!(f, "Welcome! Please select slot number!")?;
                if slots.is_empty() {
                    writeln!(f, "  (empty)")?;
                }
                for (number, slot) in slots {
                    writeln!(f, "  {:>2}: {}", number, slot)?;
                }
                write!(f, "{RULE}")
            }
            Event::SlotSelected {
                slot_number,
                item_name,
            } => write!(f, "You have selected slot number {slot_number}:{item_name}!"),
            Event::InvalidSlot => write!(f, "Please select correct slot number!"),
            Event::QuantityPrompt { available } => {
                write!(f, "Please select item quantity ({available})!")
            }
            Event::InvalidQuantity { available } => {
                write!(f, "Please select correct item quantity ({available})!")
            }
            Event::QuantitySelected { quantity } => {
                write!(f, "You have selected quantity {quantity}!")
            }
            Event::PaymentPrompt { total } => write!(
                f,
                "Total price is {total}, Please insert change {}",
                Denomination::accepted_list()
            ),
            Event::InvalidDenomination => write!(
                f,
                "Invalid input! Please use {}",
                Denomination::accepted_list()
            ),
            Event::Inserted { total_inserted, .. } => {
                write!(f, "You have inserted {total_inserted}!")
            }
            Event::Vended { receipt } => write!(
                f,
                "Vending {} {}, returning remainder of {}!",
                receipt.quantity, receipt.item_name, receipt.change
            ),
            Event::Quit { returned } => {
                write!(f, "Quitting, returning remainder of {returned}!")
            }
            Event::Failed { .. } => write!(f, "Invalid input!"),
        }
    }
}

// =============================================================================
// Transition
// =============================================================================

/// Outcome of one stage handler: where to go next and what to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: Stage,
    pub events: Vec<Event>,
}

impl Transition {
    fn to(next: Stage, events: Vec<Event>) -> Self {
        Transition { next, events }
    }

    fn stay(stage: Stage, event: Event) -> Self {
        Transition {
            next: stage,
            events: vec![event],
        }
    }

    fn failed(error: CoreError) -> Self {
        Transition {
            next: Stage::Failed,
            events: vec![Event::Failed {
                reason: error.to_string(),
            }],
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Runs purchases against a [`SlotStore`] it owns for the whole session.
#[derive(Debug)]
pub struct TransactionEngine {
    store: SlotStore,
    stage: Stage,
    transaction: Transaction,
    receipts: Vec<VendReceipt>,
}

impl TransactionEngine {
    /// Starts a session at [`Stage::Display`].
    pub fn new(store: SlotStore) -> Self {
        TransactionEngine {
            store,
            stage: Stage::Display,
            transaction: Transaction::default(),
            receipts: Vec::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    /// Every completed purchase this session, oldest first.
    pub fn receipts(&self) -> &[VendReceipt] {
        &self.receipts
    }

    /// Sum of the total prices of every completed purchase.
    pub fn total_sales(&self) -> Money {
        self.receipts
            .iter()
            .fold(Money::zero(), |sum, r| sum + r.total_price)
    }

    pub fn is_finished(&self) -> bool {
        self.stage.is_final()
    }

    /// Runs the current stage if it needs no input (Display, Vend).
    ///
    /// Input and terminal stages are left alone and produce no events.
    pub fn advance(&mut self) -> Vec<Event> {
        let transition = match self.stage {
            Stage::Display => self.on_display(),
            Stage::Vend => self.on_vend(),
            _ => return Vec::new(),
        };
        self.apply(transition)
    }

    /// Advances until the engine needs input or the session is over.
    pub fn settle(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while !self.stage.awaits_input() && !self.stage.is_final() {
            events.extend(self.advance());
        }
        events
    }

    /// Feeds one line of user input to the current stage.
    ///
    /// `quit` ends the session at any input stage. Anything a stage can't
    /// use produces a corrective prompt and leaves the stage unchanged.
    /// Outside an input stage the line is ignored.
    pub fn submit(&mut self, line: &str) -> Vec<Event> {
        if !self.stage.awaits_input() {
            debug!(stage = %self.stage, "Ignoring input outside an input stage");
            return Vec::new();
        }

        let line = line.trim();
        let transition = if line == QUIT_COMMAND {
            self.on_quit()
        } else {
            match self.stage {
                Stage::SelectSlot => self.on_select_slot(line),
                Stage::SelectQuantity => self.on_select_quantity(line),
                Stage::CollectPayment => self.on_collect_payment(line),
                _ => unreachable!("awaits_input() covers exactly the input stages"),
            }
        };
        self.apply(transition)
    }

    /// Ends the session after an unrecoverable error.
    ///
    /// The user only sees the generic failure message; `reason` goes to
    /// the logs.
    pub fn fail(&mut self, reason: impl Into<String>) -> Vec<Event> {
        let reason = reason.into();
        self.apply(Transition::to(Stage::Failed, vec![Event::Failed { reason }]))
    }

    fn apply(&mut self, transition: Transition) -> Vec<Event> {
        if transition.next != self.stage {
            debug!(from = %self.stage, to = %transition.next, "Stage change");
        }
        if let Some(Event::Failed { reason }) = transition.events.last() {
            warn!(stage = %self.stage, %reason, "Session failed");
        }
        self.stage = transition.next;
        transition.events
    }

    // -------------------------------------------------------------------------
    // Stage handlers
    // -------------------------------------------------------------------------

    fn on_display(&mut self) -> Transition {
        let slots = self
            .store
            .iter()
            .map(|(number, slot)| (number, slot.clone()))
            .collect();
        Transition::to(Stage::SelectSlot, vec![Event::Menu { slots }])
    }

    fn on_select_slot(&mut self, line: &str) -> Transition {
        // Blank lines are not an answer; wait for the next one
        if line.is_empty() {
            return Transition::to(Stage::SelectSlot, Vec::new());
        }

        let slot_number = match validate_slot_number(line, &self.store) {
            Ok(number) => number,
            Err(_) => return Transition::stay(Stage::SelectSlot, Event::InvalidSlot),
        };
        let Some(slot) = self.store.get(slot_number) else {
            return Transition::failed(CoreError::SlotNotFound(slot_number));
        };

        let events = vec![
            Event::SlotSelected {
                slot_number,
                item_name: slot.name().to_string(),
            },
            Event::QuantityPrompt {
                available: slot.quantity(),
            },
        ];
        self.transaction.selected_slot = Some(slot_number);
        Transition::to(Stage::SelectQuantity, events)
    }

    fn on_select_quantity(&mut self, line: &str) -> Transition {
        let (number, slot) = match self.selected_slot() {
            Ok(selected) => selected,
            Err(e) => return Transition::failed(e),
        };
        let available = slot.quantity();
        let unit_price = slot.unit_price();

        let quantity = match validate_selection_quantity(line, available) {
            Ok(quantity) => quantity,
            Err(_) => {
                return Transition::stay(Stage::SelectQuantity, Event::InvalidQuantity { available })
            }
        };

        let Some(total) = unit_price.checked_mul(quantity) else {
            return Transition::failed(CoreError::TotalOverflow {
                slot: number,
                quantity,
            });
        };

        self.transaction.selected_quantity = quantity;
        Transition::to(
            Stage::CollectPayment,
            vec![
                Event::QuantitySelected { quantity },
                Event::PaymentPrompt { total },
            ],
        )
    }

    fn on_collect_payment(&mut self, line: &str) -> Transition {
        let total = match self.selected_total() {
            Ok(total) => total,
            Err(e) => return Transition::failed(e),
        };

        let Some(denomination) = Denomination::parse(line) else {
            return Transition::stay(Stage::CollectPayment, Event::InvalidDenomination);
        };

        self.transaction.amount_inserted += denomination.value();
        let total_inserted = self.transaction.amount_inserted;
        let next = if total_inserted >= total {
            Stage::Vend
        } else {
            Stage::CollectPayment
        };

        Transition::to(
            next,
            vec![Event::Inserted {
                denomination,
                total_inserted,
            }],
        )
    }

    fn on_vend(&mut self) -> Transition {
        match self.dispense() {
            Ok(receipt) => {
                info!(
                    receipt_id = %receipt.id,
                    slot = receipt.slot_number,
                    item = %receipt.item_name,
                    quantity = receipt.quantity,
                    total = %receipt.total_price,
                    change = %receipt.change,
                    "Vended"
                );
                self.receipts.push(receipt.clone());
                self.transaction = Transaction::default();
                Transition::to(Stage::Display, vec![Event::Vended { receipt }])
            }
            Err(e) => Transition::failed(e),
        }
    }

    fn on_quit(&mut self) -> Transition {
        let returned = self.transaction.amount_inserted;
        info!(
            stage = %self.stage,
            returned = %returned,
            abandoned_slot = ?self.transaction.selected_slot,
            "Quit"
        );
        self.transaction = Transaction::default();
        Transition::to(Stage::Quit, vec![Event::Quit { returned }])
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn selected_slot(&self) -> CoreResult<(usize, &Slot)> {
        let number = self
            .transaction
            .selected_slot
            .ok_or(CoreError::SlotNotFound(0))?;
        let slot = self
            .store
            .get(number)
            .ok_or(CoreError::SlotNotFound(number))?;
        Ok((number, slot))
    }

    /// Unit price × selected quantity for the purchase in progress.
    fn selected_total(&self) -> CoreResult<Money> {
        let (number, slot) = self.selected_slot()?;
        let quantity = self.transaction.selected_quantity;
        slot.unit_price()
            .checked_mul(quantity)
            .ok_or(CoreError::TotalOverflow {
                slot: number,
                quantity,
            })
    }

    /// Takes the selected quantity out of the selected slot.
    fn dispense(&mut self) -> CoreResult<VendReceipt> {
        let (number, _) = self.selected_slot()?;
        let quantity = self.transaction.selected_quantity;
        let tendered = self.transaction.amount_inserted;

        let slot = self
            .store
            .get_mut(number)
            .ok_or(CoreError::SlotNotFound(number))?;
        let insufficient = CoreError::InsufficientQuantity {
            slot: number,
            available: slot.quantity(),
            requested: quantity,
        };

        let receipt = VendReceipt::new(number, slot, quantity, tendered)?;
        let Ok(delta) = i32::try_from(quantity) else {
            return Err(insufficient);
        };
        slot.add(-delta).ok_or(insufficient)?;
        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
