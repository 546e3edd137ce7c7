//! Threshold validation of individual readings against BS 7671 limits.
//!
//! Every function here is total: missing values, unknown devices and unknown
//! step ids all produce a [`Verdict`], never an error. A failed electrical test
//! is a normal outcome with `severity = error`.

use crate::enums::{TestKind, TestStatus};
use crate::reading::TestReading;
use crate::thresholds::{
    CONTINUITY_INVESTIGATE_OHMS, CONTINUITY_MAX_OHMS, DeviceId, INSULATION_MIN_MEGOHMS,
    INSULATION_RECOMMENDED_MEGOHMS, RcdRating, ResolvedDevice, ThresholdTable, get_80_percent_zs,
};
use crate::verdict::Verdict;

const REF_CONTINUITY: &str = "BS 7671 Regulation 643.2.1, Table 62";
const REF_INSULATION: &str = "BS 7671 Regulation 643.3, Table 61";
const REF_ZS_MAX: &str = "BS 7671 Table 41.3";
const REF_ZS_AMBIENT: &str = "BS 7671 Regulation 643.7.2";
const REF_RCD: &str = "BS 7671 Regulation 643.8";
const REF_POLARITY: &str = "BS 7671 Regulation 643.6";

/// Classifies readings against an injected [`ThresholdTable`].
#[derive(Debug, Clone)]
pub struct ThresholdValidator {
    table: ThresholdTable,
    default_device: DeviceId,
    default_rcd_rating: RcdRating,
}

impl Default for ThresholdValidator {
    fn default() -> Self {
        Self::new(ThresholdTable::bs7671())
    }
}

impl ThresholdValidator {
    #[must_use]
    pub fn new(table: ThresholdTable) -> Self {
        Self {
            table,
            default_device: DeviceId::fallback(),
            default_rcd_rating: RcdRating::default(),
        }
    }

    /// Device assumed for Zs readings that do not name one.
    #[must_use]
    pub fn with_default_device(mut self, device: DeviceId) -> Self {
        self.default_device = device;
        self
    }

    /// Rating assumed for RCD readings that do not name one.
    #[must_use]
    pub const fn with_default_rcd_rating(mut self, rating: RcdRating) -> Self {
        self.default_rcd_rating = rating;
        self
    }

    #[must_use]
    pub const fn table(&self) -> &ThresholdTable {
        &self.table
    }

    /// R1+R2 continuity in ohms.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn validate_continuity(&self, reading: &TestReading) -> Verdict {
        let Some(value) = reading.measured() else {
            return missing("Continuity").citing(REF_CONTINUITY);
        };

        let verdict = if value > CONTINUITY_MAX_OHMS {
            Verdict::error(format!(
                "R1+R2 of {value}Ω exceeds the maximum of {CONTINUITY_MAX_OHMS}Ω"
            ))
        } else if value > CONTINUITY_INVESTIGATE_OHMS {
            Verdict::warning(format!(
                "R1+R2 of {value}Ω is acceptable but should be investigated"
            ))
        } else {
            Verdict::info(format!("R1+R2 of {value}Ω is satisfactory"))
        };
        verdict.citing(REF_CONTINUITY)
    }

    /// Insulation resistance in megohms.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn validate_insulation_resistance(&self, reading: &TestReading) -> Verdict {
        let Some(value) = reading.measured() else {
            return missing("Insulation resistance").citing(REF_INSULATION);
        };

        let verdict = if value < INSULATION_MIN_MEGOHMS {
            Verdict::error(format!(
                "Insulation resistance of {value}MΩ is below the {INSULATION_MIN_MEGOHMS:.1}MΩ minimum"
            ))
        } else if value < INSULATION_RECOMMENDED_MEGOHMS {
            Verdict::warning(format!(
                "Insulation resistance of {value}MΩ meets the minimum but is below the recommended {INSULATION_RECOMMENDED_MEGOHMS:.1}MΩ"
            ))
        } else {
            Verdict::info(format!(
                "Insulation resistance of {value}MΩ is satisfactory"
            ))
        };
        verdict.citing(REF_INSULATION)
    }

    /// Earth fault loop impedance in ohms, judged against `device_id`.
    ///
    /// Unknown devices use the `B32` limits, and the message says so.
    #[must_use]
    pub fn validate_earth_fault_loop(&self, reading: &TestReading, device_id: &str) -> Verdict {
        let Some(value) = reading.measured() else {
            return missing("Earth fault loop impedance").citing(REF_ZS_MAX);
        };

        let resolved = self.table.resolve_max_zs(device_id);
        let device = device_label(&resolved, device_id);
        let max_zs = resolved.max_zs;
        let test_zs = get_80_percent_zs(max_zs);

        if value > max_zs {
            Verdict::error(format!(
                "Zs of {value}Ω exceeds the maximum of {max_zs}Ω for {device}"
            ))
            .citing(REF_ZS_MAX)
        } else if value > test_zs {
            Verdict::warning(format!(
                "Zs of {value}Ω is above the 80% limit of {test_zs}Ω for {device} and may fail at operating temperature"
            ))
            .citing(REF_ZS_AMBIENT)
        } else {
            Verdict::info(format!(
                "Zs of {value}Ω is within the limit for {device} (max {max_zs}Ω)"
            ))
            .citing(REF_ZS_MAX)
        }
    }

    /// RCD trip time in milliseconds.
    ///
    /// Only the 1× rated-current limit is applied; a reading taken at 5× is
    /// judged against the same 300 ms ceiling.
    #[must_use]
    pub fn validate_rcd_test(&self, reading: &TestReading, rating: RcdRating) -> Verdict {
        let Some(value) = reading.measured() else {
            return missing("RCD trip time").citing(REF_RCD);
        };

        let max_ms = self.table.rcd_limits(rating).max_trip_ms_x1;
        let caution_ms = max_ms * 0.8;

        let verdict = if value > max_ms {
            Verdict::error(format!(
                "RCD trip time of {value}ms exceeds the maximum of {max_ms}ms for a {rating} RCD"
            ))
        } else if value > caution_ms {
            Verdict::warning(format!(
                "RCD trip time of {value}ms is close to the {max_ms}ms limit"
            ))
        } else {
            Verdict::info(format!("RCD trip time of {value}ms is satisfactory"))
        };
        verdict.citing(REF_RCD)
    }

    /// Formats a polarity status assigned by the caller.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn validate_polarity(&self, reading: &TestReading) -> Verdict {
        let verdict = match reading.status {
            Some(TestStatus::Failed) => Verdict::error("Polarity incorrect"),
            Some(TestStatus::Completed) => Verdict::info("Polarity verified"),
            Some(TestStatus::Pending) | None => Verdict::warning("Polarity check incomplete"),
        };
        verdict.citing(REF_POLARITY)
    }

    /// Validate a reading according to its own kind.
    #[must_use]
    pub fn validate(&self, reading: &TestReading) -> Verdict {
        self.validate_as(reading.kind, reading)
    }

    /// Validate a reading as `kind`, using the reading's device rating or the
    /// configured defaults.
    #[must_use]
    pub fn validate_as(&self, kind: TestKind, reading: &TestReading) -> Verdict {
        match kind {
            TestKind::Continuity => self.validate_continuity(reading),
            TestKind::InsulationResistance => self.validate_insulation_resistance(reading),
            TestKind::EarthFaultLoop => {
                let device = reading
                    .device_rating
                    .as_deref()
                    .unwrap_or(self.default_device.as_str());
                self.validate_earth_fault_loop(reading, device)
            }
            TestKind::RcdTrip => {
                let rating = match reading.device_rating.as_deref() {
                    Some(raw) => raw.parse().unwrap_or_else(|_| {
                        tracing::debug!(rating = raw, "unrecognised RCD rating, using default");
                        self.default_rcd_rating
                    }),
                    None => self.default_rcd_rating,
                };
                self.validate_rcd_test(reading, rating)
            }
            TestKind::Polarity => self.validate_polarity(reading),
        }
    }

    /// Validate a reading by step id. Unrecognised ids pass as "Test completed".
    #[must_use]
    pub fn dispatch(&self, step_id: &str, reading: &TestReading) -> Verdict {
        match TestKind::from_step_id(step_id) {
            Some(kind) => self.validate_as(kind, reading),
            None => {
                tracing::debug!(step_id, "no validation rule for step");
                Verdict::test_completed()
            }
        }
    }
}

fn missing(what: &str) -> Verdict {
    Verdict::error(format!("{what} reading required"))
}

fn device_label(resolved: &ResolvedDevice, requested: &str) -> String {
    if !resolved.fell_back {
        return resolved.device.to_string();
    }
    let requested = requested.trim();
    if requested.is_empty() {
        format!("{} (no device given)", resolved.device)
    } else {
        format!("{} (assumed, '{requested}' not recognised)", resolved.device)
    }
}
