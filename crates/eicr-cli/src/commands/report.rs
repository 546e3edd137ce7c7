use eicr_config::EicrConfig;
use eicr_core::enums::OverallAssessment;
use eicr_core::observations::assess_observations;
use eicr_core::responses::ReportResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::commands::Outcome;
use crate::commands::shared::session::load_session;
use crate::output::output;

/// Handle `eicr report <file>`.
///
/// A non-compliant report is a normal result. Only `--strict` (or
/// `general.strict`) turns it into exit status 2.
pub fn handle(
    args: &ReportArgs,
    config: &EicrConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    let session = load_session(&args.file)?;
    let validator = config.threshold_validator()?;

    let report = validator.build_compliance_report(&session.flow, &session.results);
    let assessment =
        (!session.observations.is_empty()).then(|| assess_observations(&session.observations));

    let compliant = report.overall_compliance
        && assessment
            .as_ref()
            .is_none_or(|a| a.overall == OverallAssessment::Satisfactory);

    tracing::debug!(
        flow = %session.flow.id,
        critical = report.critical_issues.len(),
        warnings = report.warnings.len(),
        compliant,
        "report built"
    );

    output(
        &ReportResponse {
            flow_id: session.flow.id,
            report,
            assessment,
        },
        flags.format,
    )?;

    if (args.strict || config.general.strict) && !compliant {
        return Ok(Outcome::NonCompliant);
    }
    Ok(Outcome::Done)
}
