//! # Application Error Type
//!
//! Failures that stop the program before or outside a session.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ConfigError ─────┐                                                    │
//! │                   ├──► AppError ──► anyhow (main) ──► stderr, exit 1    │
//! │  io::Error ───────┘                                                    │
//! │                                                                         │
//! │  Problems *inside* a session never get here: the session prints         │
//! │  "Invalid input!" and ends on its own (see `session`).                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The inventory file could not be read.
    #[error("Failed to read inventory file {}: {source}", path.display())]
    Inventory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Console I/O failed outside the session loop.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
