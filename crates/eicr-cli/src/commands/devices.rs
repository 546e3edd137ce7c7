use eicr_config::EicrConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DevicesArgs;
use crate::commands::Outcome;
use crate::output::output;

/// Handle `eicr devices`.
pub fn handle(
    args: &DevicesArgs,
    config: &EicrConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    let table = config.threshold_table()?;

    if args.rcd {
        output(&table.rcd_rows(), flags.format)?;
        return Ok(Outcome::Done);
    }

    let curve = args.curve.map(|c| c.to_ascii_uppercase());
    if let Some(curve) = curve {
        if !matches!(curve, 'B' | 'C' | 'D') {
            anyhow::bail!("invalid --curve '{curve}': expected B, C or D");
        }
    }

    output(&table.devices(curve), flags.format)?;
    Ok(Outcome::Done)
}
