//! Mapping from walkthrough step ids to test kinds.
//!
//! Step ids arrive as free text from the flow definition. They are resolved to
//! a [`TestKind`] once, here; everything downstream matches on the enum.

use crate::enums::TestKind;

/// Every step id the validator recognises, matched exactly.
pub const STEP_IDS: &[(&str, TestKind)] = &[
    ("continuity", TestKind::Continuity),
    ("r1-r2", TestKind::Continuity),
    ("continuity-r1r2", TestKind::Continuity),
    ("insulation-resistance", TestKind::InsulationResistance),
    ("insulation-test", TestKind::InsulationResistance),
    ("ir-test", TestKind::InsulationResistance),
    ("zs-measurement", TestKind::EarthFaultLoop),
    ("earth-fault-loop", TestKind::EarthFaultLoop),
    ("zs-test", TestKind::EarthFaultLoop),
    ("rcd-test", TestKind::RcdTrip),
    ("rcd-trip-time", TestKind::RcdTrip),
    ("polarity", TestKind::Polarity),
    ("polarity-check", TestKind::Polarity),
    ("polarity-test", TestKind::Polarity),
];

impl TestKind {
    /// Resolve a step id. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_step_id(step_id: &str) -> Option<Self> {
        STEP_IDS
            .iter()
            .find(|(id, _)| *id == step_id)
            .map(|(_, kind)| *kind)
    }

    /// Step ids that resolve to this kind.
    pub fn step_ids(self) -> impl Iterator<Item = &'static str> {
        STEP_IDS
            .iter()
            .filter(move |(_, kind)| *kind == self)
            .map(|(id, _)| *id)
    }
}
