use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{TestKind, TestStatus};

/// A single value captured from a test step.
///
/// `value` is absent until the inspector enters something. `device_rating`
/// carries the protective device for Zs readings (`"B32"`) and the RCD rating
/// for trip-time readings (`"30"`, `"30mA"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TestReading {
    pub kind: TestKind,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub circuit_type: Option<String>,
    #[serde(default)]
    pub device_rating: Option<String>,
    #[serde(default)]
    pub status: Option<TestStatus>,
}

impl TestReading {
    /// An empty reading of the given kind, in its default unit.
    #[must_use]
    pub fn new(kind: TestKind) -> Self {
        Self {
            kind,
            value: None,
            unit: kind.default_unit().to_string(),
            circuit_type: None,
            device_rating: None,
            status: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device_rating = Some(device.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: TestStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_circuit_type(mut self, circuit_type: impl Into<String>) -> Self {
        self.circuit_type = Some(circuit_type.into());
        self
    }

    /// The measured value, treating `NaN` as not entered.
    #[must_use]
    pub fn measured(&self) -> Option<f64> {
        self.value.filter(|v| !v.is_nan())
    }
}
