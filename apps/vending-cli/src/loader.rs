//! # Inventory Loader
//!
//! Reads the inventory file and packs it into a fresh [`SlotStore`].
//!
//! Parsing and packing live in `vend_core::inventory`; this module only
//! owns the file.

use std::fs;
use std::path::Path;

use tracing::{info, warn};
use vend_core::inventory::{load_inventory, LoadReport};
use vend_core::SlotStore;

use crate::error::{AppError, AppResult};

/// Loads the inventory at `path` into a new store.
///
/// ## Errors
/// `AppError::Inventory` if the file can't be read. Malformed lines are
/// not errors: they are logged and listed in the [`LoadReport`].
pub fn load_inventory_file(path: &Path) -> AppResult<(SlotStore, LoadReport)> {
    let text = fs::read_to_string(path).map_err(|source| AppError::Inventory {
        path: path.to_path_buf(),
        source,
    })?;

    if text.trim().is_empty() {
        warn!(path = %path.display(), "Inventory file is empty");
    }

    let mut store = SlotStore::new();
    let report = load_inventory(&mut store, &text);

    info!(
        path = %path.display(),
        inserted = report.inserted,
        skipped = report.skipped,
        rejected = report.rejected.len(),
        slots = store.len(),
        "Inventory loaded"
    );

    Ok((store, report))
}
