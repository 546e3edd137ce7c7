//! On-disk shape of a recorded test session.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::observations::Observation;
use crate::report::{SessionResults, TestFlow};

/// A flow definition, the readings captured against it, and any observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SessionFile {
    pub flow: TestFlow,
    #[serde(default)]
    pub results: SessionResults,
    #[serde(default)]
    pub observations: Vec<Observation>,
}
