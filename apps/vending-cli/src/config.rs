//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, then command-line flags override both.
//!
//! ## Sources (Priority Order)
//! 1. Flags (`--inventory`, `--log`)
//! 2. Environment variables (`VENDING_*`)
//! 3. Defaults (this file)

use std::env;
use std::path::PathBuf;

/// Inventory file looked up in the working directory by default.
pub const DEFAULT_INVENTORY_PATH: &str = "test_input.txt";

/// Usage text for `--help`.
pub const USAGE: &str = "\
Vending Machine Simulator

Usage: vending-machine [OPTIONS]

Options:
  -i, --inventory <PATH>   Inventory file, one `name|quantity|price` per line
                           (default: ./test_input.txt, env: VENDING_INVENTORY_PATH)
  -l, --log <FILTER>       Log filter, e.g. `debug` (env: VENDING_LOG, RUST_LOG wins)
  -h, --help               Show this help message

Type `quit` at any prompt to leave.";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Where the inventory is read from
    pub inventory_path: PathBuf,

    /// tracing filter directive, if not left to the default
    pub log_filter: Option<String>,
}

/// What the user asked the binary to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(CliConfig),
    Help,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            inventory_path: PathBuf::from(DEFAULT_INVENTORY_PATH),
            log_filter: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which stands in for the
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = CliConfig::default();

        if let Some(path) = lookup("VENDING_INVENTORY_PATH") {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue("VENDING_INVENTORY_PATH".to_string()));
            }
            config.inventory_path = PathBuf::from(path);
        }

        config.log_filter = lookup("VENDING_LOG").filter(|f| !f.trim().is_empty());

        Ok(config)
    }

    /// Applies command-line flags on top of this configuration.
    pub fn apply_args<I>(mut self, args: I) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--inventory" | "-i" => {
                    let path = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    self.inventory_path = PathBuf::from(path);
                }
                "--log" | "-l" => {
                    let filter = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    self.log_filter = Some(filter);
                }
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        Ok(Command::Run(self))
    }
}

/// Reads the environment, then the flags.
pub fn load<I>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    CliConfig::from_env()?.apply_args(args)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unknown argument: {0} (try --help)")]
    UnknownArgument(String),
}
