//! # Console Session
//!
//! Connects a line reader and a writer to a [`TransactionEngine`].
//!
//! ## Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──► engine.settle() ──► print events                                 │
//! │   │         │                                                           │
//! │   │    finished? ── yes ──► done                                        │
//! │   │         │ no                                                        │
//! │   │         ▼                                                           │
//! │   │    read a line ── EOF / read error ──► engine.fail() ──► done       │
//! │   │         │                                                           │
//! │   │         ▼                                                           │
//! │   └── engine.submit(line) ──► print events                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bad slots, quantities and coins are the engine's business and just
//! re-prompt. Losing the input is fatal: the user sees "Invalid input!" and
//! the session ends without further interaction.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;
use vend_core::{Event, Money, Stage, TransactionEngine};

/// Why a session had to stop.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("input closed before the session ended")]
    InputClosed,

    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// `Quit` or `Failed`.
    pub outcome: Stage,
    /// Completed purchases.
    pub vends: usize,
    pub total_sales: Money,
}

/// Runs one session until the user quits or input fails.
///
/// ## Errors
/// Only a failure to *write* to `output` is returned; input problems end
/// the session normally with [`Stage::Failed`].
pub fn run_session<R, W>(
    engine: &mut TransactionEngine,
    mut input: R,
    mut output: W,
) -> io::Result<SessionSummary>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();

    loop {
        write_events(&mut output, &engine.settle())?;
        if engine.is_finished() {
            break;
        }

        line.clear();
        let events = match input.read_line(&mut line) {
            Ok(0) => engine.fail(SessionError::InputClosed.to_string()),
            Ok(_) => engine.submit(&line),
            Err(e) => engine.fail(SessionError::Read(e).to_string()),
        };
        write_events(&mut output, &events)?;
    }

    output.flush()?;

    Ok(SessionSummary {
        outcome: engine.stage(),
        vends: engine.receipts().len(),
        total_sales: engine.total_sales(),
    })
}

fn write_events<W: Write>(output: &mut W, events: &[Event]) -> io::Result<()> {
    for event in events {
        debug!(?event, "Event");
        writeln!(output, "{event}")?;
    }
    output.flush()
}
