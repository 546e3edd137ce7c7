use eicr_config::EicrConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands::{self, Outcome};

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: &Commands,
    config: &EicrConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    match command {
        Commands::Validate(args) => commands::validate::handle(args, config, flags),
        Commands::Dispatch(args) => commands::step::handle(args, config, flags),
        Commands::Report(args) => commands::report::handle(args, config, flags),
        Commands::Devices(args) => commands::devices::handle(args, config, flags),
        Commands::Assess(args) => commands::assess::handle(args, flags),
        Commands::Schema(args) => commands::schema::handle(args, flags),
    }
}
