//! EICR observations and the overall condition of the installation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ObservationCode, OverallAssessment};

/// A defect or departure recorded during inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Observation {
    /// Schedule item number, e.g. `"3.5"`.
    pub item: String,
    pub description: String,
    pub code: ObservationCode,
    #[serde(default)]
    pub location: Option<String>,
}

/// Number of observations per classification code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CodeCounts {
    pub c1: usize,
    pub c2: usize,
    pub c3: usize,
    pub fi: usize,
}

impl CodeCounts {
    fn bump(&mut self, code: ObservationCode) {
        match code {
            ObservationCode::C1 => self.c1 += 1,
            ObservationCode::C2 => self.c2 += 1,
            ObservationCode::C3 => self.c3 += 1,
            ObservationCode::FI => self.fi += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.c1 + self.c2 + self.c3 + self.fi
    }

    #[must_use]
    pub const fn get(&self, code: ObservationCode) -> usize {
        match code {
            ObservationCode::C1 => self.c1,
            ObservationCode::C2 => self.c2,
            ObservationCode::C3 => self.c3,
            ObservationCode::FI => self.fi,
        }
    }
}

/// Report wording for a code that appears in the observations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CodeMeaning {
    pub code: ObservationCode,
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Assessment {
    pub overall: OverallAssessment,
    pub counts: CodeCounts,
    /// `"<item> [<code>] <description>"` for every C1, C2 and FI observation.
    pub unsatisfactory_items: Vec<String>,
    /// One entry per code used, in C1, C2, C3, FI order.
    pub legend: Vec<CodeMeaning>,
}

/// Any C1, C2 or FI makes the installation unsatisfactory; C3 alone does not.
#[must_use]
pub fn assess_observations(observations: &[Observation]) -> Assessment {
    let mut counts = CodeCounts::default();
    let mut unsatisfactory_items = Vec::new();

    for observation in observations {
        counts.bump(observation.code);
        if observation.code.makes_unsatisfactory() {
            unsatisfactory_items.push(format!(
                "{} [{}] {}",
                observation.item, observation.code, observation.description
            ));
        }
    }

    let overall = if unsatisfactory_items.is_empty() {
        OverallAssessment::Satisfactory
    } else {
        OverallAssessment::Unsatisfactory
    };

    let legend = ObservationCode::ALL
        .into_iter()
        .filter(|code| counts.get(*code) > 0)
        .map(|code| CodeMeaning {
            code,
            meaning: code.meaning().to_string(),
        })
        .collect();

    Assessment {
        overall,
        counts,
        unsatisfactory_items,
        legend,
    }
}
