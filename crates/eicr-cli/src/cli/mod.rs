use std::path::PathBuf;

use clap::Parser;
use eicr_config::EicrConfig;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `eicr` binary.
#[derive(Debug, Parser)]
#[command(
    name = "eicr",
    version,
    about = "BS 7671 test-result validation for EICR inspections"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to `general.default_format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra TOML configuration layered over the project and user files
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolve global flags against loaded configuration.
    #[must_use]
    pub fn global_flags(&self, config: &EicrConfig) -> GlobalFlags {
        let format = self
            .format
            .or_else(|| OutputFormat::from_config(&config.general.default_format))
            .unwrap_or(OutputFormat::Json);

        GlobalFlags {
            format,
            quiet: self.quiet,
        }
    }
}
