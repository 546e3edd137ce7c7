use eicr_config::EicrConfig;
use eicr_core::responses::ValidateResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::commands::Outcome;
use crate::output::output;

/// Handle `eicr validate`.
pub fn handle(
    args: &ValidateArgs,
    config: &EicrConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    let validator = config.threshold_validator()?;
    let reading = args.reading.to_reading(args.kind);
    let verdict = validator.validate(&reading);

    output(
        &ValidateResponse {
            judged_as: Some(args.kind),
            step_id: None,
            verdict,
            value: reading.measured(),
            unit: reading.unit,
        },
        flags.format,
    )?;
    Ok(Outcome::Done)
}
