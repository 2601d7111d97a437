//! # Vending CLI Library
//!
//! Wiring for the vending machine console application.
//!
//! ## Module Organization
//! ```text
//! vending_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── Environment + flags
//! ├── loader.rs       ◄─── Inventory file → SlotStore
//! ├── session.rs      ◄─── stdin/stdout ↔ TransactionEngine
//! └── error.rs        ◄─── Startup error type
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod session;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;
use vend_core::TransactionEngine;

use config::{CliConfig, Command, USAGE};
use error::AppResult;

/// Filter used when neither `RUST_LOG` nor `VENDING_LOG` is set.
const DEFAULT_LOG_FILTER: &str = "warn,vending_cli=info";

/// Runs the vending machine.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load configuration (env, then flags)                                │
/// │  2. Initialize logging (stderr, so stdout is only the machine)          │
/// │  3. Load the inventory file into a SlotStore                            │
/// │  4. Run the session on stdin/stdout until quit or input failure         │
/// │  5. Log the session summary                                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> AppResult<()> {
    let config = match config::load(std::env::args().skip(1))? {
        Command::Run(config) => config,
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
    };

    init_tracing(&config);
    info!(inventory = %config.inventory_path.display(), "Starting vending machine");

    let (store, _report) = loader::load_inventory_file(&config.inventory_path)?;
    let mut engine = TransactionEngine::new(store);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = session::run_session(&mut engine, stdin.lock(), stdout.lock())?;

    info!(
        outcome = %summary.outcome,
        vends = summary.vends,
        total_sales = %summary.total_sales,
        "Session ended"
    );
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - wins over everything
/// - `VENDING_LOG` / `--log` - used when `RUST_LOG` is unset
/// - Default: warnings, plus startup/shutdown info from this crate
fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
