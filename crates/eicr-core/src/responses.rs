//! CLI response types returned as JSON by `eicr` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TestKind;
use crate::observations::Assessment;
use crate::report::ComplianceReport;
use crate::verdict::Verdict;

/// Response from `eicr validate` and `eicr dispatch`.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ValidateResponse {
    /// Kind the reading was judged as, if any rule applied.
    pub judged_as: Option<TestKind>,
    pub step_id: Option<String>,
    pub value: Option<f64>,
    pub unit: String,
    pub verdict: Verdict,
}

/// Response from `eicr report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportResponse {
    pub flow_id: String,
    pub report: ComplianceReport,
    /// Present when the session recorded observations.
    pub assessment: Option<Assessment>,
}
