//! Test kinds, severities, statuses, and EICR observation codes.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! except [`ObservationCode`] which keeps the upper-case codes printed on the
//! certificate (`C1`, `C2`, `C3`, `FI`).

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// TestKind
// ---------------------------------------------------------------------------

/// The dead-test and live-test measurements a reading can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    /// R1+R2 continuity of line and circuit protective conductor (ohms).
    Continuity,
    /// Insulation resistance between live conductors and earth (megohms).
    InsulationResistance,
    /// Earth fault loop impedance Zs (ohms).
    EarthFaultLoop,
    /// RCD disconnection time (milliseconds).
    RcdTrip,
    /// Polarity check. Not numeric; driven by [`TestStatus`].
    Polarity,
}

impl TestKind {
    pub const ALL: [Self; 5] = [
        Self::Continuity,
        Self::InsulationResistance,
        Self::EarthFaultLoop,
        Self::RcdTrip,
        Self::Polarity,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continuity => "continuity",
            Self::InsulationResistance => "insulation_resistance",
            Self::EarthFaultLoop => "earth_fault_loop",
            Self::RcdTrip => "rcd_trip",
            Self::Polarity => "polarity",
        }
    }

    /// Unit a reading of this kind is expected in.
    #[must_use]
    pub const fn default_unit(self) -> &'static str {
        match self {
            Self::Continuity | Self::EarthFaultLoop => "Ω",
            Self::InsulationResistance => "MΩ",
            Self::RcdTrip => "ms",
            Self::Polarity => "",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownValue {
                kind: "test kind",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Outcome level of a single validation.
///
/// Ordered from least to most severe so `max()` picks the worst verdict.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Only `error` marks a reading as invalid.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TestStatus
// ---------------------------------------------------------------------------

/// Status a caller assigns to a non-numeric check such as polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl TestStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(CoreError::UnknownValue {
                kind: "test status",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ObservationCode
// ---------------------------------------------------------------------------

/// EICR classification code recorded against an observation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum ObservationCode {
    C1,
    C2,
    C3,
    FI,
}

impl ObservationCode {
    pub const ALL: [Self; 4] = [Self::C1, Self::C2, Self::C3, Self::FI];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::C1 => "C1",
            Self::C2 => "C2",
            Self::C3 => "C3",
            Self::FI => "FI",
        }
    }

    /// Wording printed beside the code on the report.
    #[must_use]
    pub const fn meaning(self) -> &'static str {
        match self {
            Self::C1 => "Danger present - Risk of injury. Immediate remedial action required.",
            Self::C2 => "Potentially dangerous - Urgent remedial action required.",
            Self::C3 => "Improvement recommended - Does not meet current standard.",
            Self::FI => "Further Investigation required without delay.",
        }
    }

    /// Codes that make the installation unsatisfactory for continued use.
    #[must_use]
    pub const fn makes_unsatisfactory(self) -> bool {
        !matches!(self, Self::C3)
    }
}

impl fmt::Display for ObservationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObservationCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == upper)
            .ok_or_else(|| CoreError::UnknownValue {
                kind: "observation code",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// OverallAssessment
// ---------------------------------------------------------------------------

/// Overall condition of the installation as stated in the report summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OverallAssessment {
    Satisfactory,
    Unsatisfactory,
}

impl OverallAssessment {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Satisfactory => "satisfactory",
            Self::Unsatisfactory => "unsatisfactory",
        }
    }
}

impl fmt::Display for OverallAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
