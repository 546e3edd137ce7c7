//! Aggregate compliance reporting over a completed test flow.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Severity, TestKind};
use crate::reading::TestReading;
use crate::validator::ThresholdValidator;

/// Reminders appended to every report regardless of results.
pub const RECOMMENDATIONS: [&str; 5] = [
    "Ensure all test instruments are within their calibration period",
    "Record every result on the schedule of test results",
    "Re-test affected circuits after any remedial work before issuing the certificate",
    "Confirm protective device ratings match the circuit chart",
    "Agree the next inspection date with the client in line with IET Guidance Note 3",
];

/// One step of a test walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TestStep {
    pub id: String,
    pub title: String,
    /// Overrides the kind inferred from `id`.
    #[serde(default)]
    pub kind: Option<TestKind>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TestStep {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: None,
            description: None,
        }
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: TestKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Explicit kind if set, otherwise the kind its id maps to.
    #[must_use]
    pub fn resolved_kind(&self) -> Option<TestKind> {
        self.kind.or_else(|| TestKind::from_step_id(&self.id))
    }
}

/// Ordered list of steps making up a walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TestFlow {
    pub id: String,
    pub title: String,
    pub steps: Vec<TestStep>,
}

/// Recorded readings keyed by step id.
pub type SessionResults = BTreeMap<String, TestReading>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceReport {
    pub overall_compliance: bool,
    pub critical_issues: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ThresholdValidator {
    /// Classify every recorded result of `flow`, in step order.
    ///
    /// Steps without a result and results without a step are skipped.
    #[must_use]
    pub fn build_compliance_report(
        &self,
        flow: &TestFlow,
        results: &SessionResults,
    ) -> ComplianceReport {
        let mut critical_issues = Vec::new();
        let mut warnings = Vec::new();

        for step in &flow.steps {
            let Some(reading) = results.get(&step.id) else {
                continue;
            };

            let verdict = match step.resolved_kind() {
                Some(kind) => self.validate_as(kind, reading),
                None => self.dispatch(&step.id, reading),
            };

            let line = format!("{}: {}", step.title, verdict.message());
            match verdict.severity() {
                Severity::Error => critical_issues.push(line),
                Severity::Warning => warnings.push(line),
                Severity::Info => {}
            }
        }

        let skipped = results
            .keys()
            .filter(|id| !flow.steps.iter().any(|step| &step.id == *id))
            .count();
        if skipped > 0 {
            tracing::warn!(flow = %flow.id, skipped, "results recorded for steps not in the flow");
        }

        ComplianceReport {
            overall_compliance: critical_issues.is_empty(),
            critical_issues,
            warnings,
            recommendations: RECOMMENDATIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// [`ThresholdValidator::build_compliance_report`] against the built-in table.
#[must_use]
pub fn build_compliance_report(flow: &TestFlow, results: &SessionResults) -> ComplianceReport {
    ThresholdValidator::default().build_compliance_report(flow, results)
}
