use eicr_core::observations::assess_observations;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AssessArgs;
use crate::commands::Outcome;
use crate::commands::shared::session::load_session;
use crate::output::output;

/// Handle `eicr assess <file>`.
pub fn handle(args: &AssessArgs, flags: &GlobalFlags) -> anyhow::Result<Outcome> {
    let session = load_session(&args.file)?;
    output(&assess_observations(&session.observations), flags.format)?;
    Ok(Outcome::Done)
}
