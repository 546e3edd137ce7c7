use std::path::PathBuf;

use clap::{Args, Subcommand};
use eicr_core::enums::{TestKind, TestStatus};
use eicr_core::reading::TestReading;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Validate one reading against BS 7671 limits.
    Validate(ValidateArgs),
    /// Validate one reading by walkthrough step id.
    Dispatch(DispatchArgs),
    /// Build a compliance report from a session file.
    Report(ReportArgs),
    /// List maximum Zs per protective device, or RCD trip-time limits.
    Devices(DevicesArgs),
    /// Classify the observations recorded in a session file.
    Assess(AssessArgs),
    /// Print a registered JSON Schema.
    Schema(SchemaArgs),
}

/// Measured value and context shared by `validate` and `dispatch`.
#[derive(Clone, Debug, Default, Args)]
pub struct ReadingArgs {
    /// Measured value in the test's unit.
    #[arg(long, allow_negative_numbers = true)]
    pub value: Option<f64>,
    /// Unit label (defaults to the test's own unit).
    #[arg(long)]
    pub unit: Option<String>,
    /// Protective device for Zs readings, e.g. B32.
    #[arg(long, conflicts_with = "rating")]
    pub device: Option<String>,
    /// RCD rating in mA: 30, 100, 300 or 500.
    #[arg(long)]
    pub rating: Option<String>,
    /// Status for non-numeric checks: pending, completed, failed.
    #[arg(long)]
    pub status: Option<TestStatus>,
    #[arg(long)]
    pub circuit_type: Option<String>,
}

impl ReadingArgs {
    /// Assemble a reading of `kind` from the flags.
    #[must_use]
    pub fn to_reading(&self, kind: TestKind) -> TestReading {
        let mut reading = TestReading::new(kind);
        reading.value = self.value;
        if let Some(unit) = &self.unit {
            reading.unit.clone_from(unit);
        }
        reading.device_rating = self.device.clone().or_else(|| self.rating.clone());
        reading.status = self.status;
        reading.circuit_type.clone_from(&self.circuit_type);
        reading
    }
}

#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    /// continuity, insulation_resistance, earth_fault_loop, rcd_trip, polarity
    #[arg(short, long)]
    pub kind: TestKind,
    #[command(flatten)]
    pub reading: ReadingArgs,
}

#[derive(Clone, Debug, Args)]
pub struct DispatchArgs {
    /// Step id such as `zs-test` or `r1-r2`.
    pub step_id: String,
    #[command(flatten)]
    pub reading: ReadingArgs,
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Session file (.json or .toml).
    pub file: PathBuf,
    /// Exit with status 2 when the installation is not compliant.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Debug, Args)]
pub struct DevicesArgs {
    /// Only devices of this curve (B, C or D).
    #[arg(long, conflicts_with = "rcd")]
    pub curve: Option<char>,
    /// List RCD trip-time limits instead of devices.
    #[arg(long)]
    pub rcd: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AssessArgs {
    /// Session file (.json or .toml).
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name, e.g. `session_file`.
    #[arg(required_unless_present = "list")]
    pub name: Option<String>,
    /// List registered schema names.
    #[arg(long)]
    pub list: bool,
}
