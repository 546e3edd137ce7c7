use eicr_config::EicrConfig;
use eicr_core::enums::TestKind;
use eicr_core::responses::ValidateResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DispatchArgs;
use crate::commands::Outcome;
use crate::output::output;

/// Handle `eicr dispatch <step-id>`.
pub fn handle(
    args: &DispatchArgs,
    config: &EicrConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    let validator = config.threshold_validator()?;
    let judged_as = TestKind::from_step_id(&args.step_id);

    // Steps without a rule are never judged, so the kind only picks a unit.
    let reading = args
        .reading
        .to_reading(judged_as.unwrap_or(TestKind::Continuity));
    let verdict = validator.dispatch(&args.step_id, &reading);
    let unit = if judged_as.is_some() {
        reading.unit.clone()
    } else {
        args.reading.unit.clone().unwrap_or_default()
    };

    let response = ValidateResponse {
        judged_as,
        step_id: Some(args.step_id.clone()),
        value: reading.measured(),
        unit,
        verdict,
    };

    output(&response, flags.format)?;
    Ok(Outcome::Done)
}
