//! # Vending Machine Entry Point
//!
//! The actual setup is in lib.rs for better testability.

fn main() -> anyhow::Result<()> {
    vending_cli::run()?;
    Ok(())
}
