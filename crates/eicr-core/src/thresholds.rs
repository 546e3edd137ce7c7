//! BS 7671 limit tables.
//!
//! The built-in data is a compile-time constant. A [`ThresholdTable`] is built
//! from it once (optionally with configured overrides) and handed to the
//! validator; nothing mutates it afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Maximum R1+R2 before a continuity reading fails (Table 62 guidance).
pub const CONTINUITY_MAX_OHMS: f64 = 1.67;
/// R1+R2 above this is acceptable but worth investigating.
pub const CONTINUITY_INVESTIGATE_OHMS: f64 = 0.05;
/// Table 61 minimum insulation resistance for circuits up to 500 V.
pub const INSULATION_MIN_MEGOHMS: f64 = 1.0;
/// Insulation resistance below this passes but suggests deterioration.
pub const INSULATION_RECOMMENDED_MEGOHMS: f64 = 2.0;
/// Rule-of-thumb correction for conductor temperature (Regulation 643.7.2).
pub const AMBIENT_CORRECTION_FACTOR: f64 = 0.8;
/// Device used when a Zs lookup names an unknown device.
pub const FALLBACK_DEVICE: &str = "B32";
/// RCD rating used when none (or an unknown one) is supplied.
pub const DEFAULT_RCD_RATING_MA: u32 = 30;

const B32_MAX_ZS: f64 = 1.37;

/// Table 41.3, 0.4 s disconnection, `Cmin = 0.95`.
const MAX_ZS_TABLE: &[(&str, f64)] = &[
    ("B6", 7.28),
    ("B10", 4.37),
    ("B16", 2.73),
    ("B20", 2.19),
    ("B25", 1.75),
    ("B32", B32_MAX_ZS),
    ("B40", 1.09),
    ("B50", 0.87),
    ("B63", 0.69),
    ("B80", 0.55),
    ("B100", 0.44),
    ("B125", 0.35),
    ("C6", 3.64),
    ("C10", 2.19),
    ("C16", 1.37),
    ("C20", 1.09),
    ("C25", 0.87),
    ("C32", 0.68),
    ("C40", 0.55),
    ("C50", 0.44),
    ("C63", 0.35),
    ("C80", 0.27),
    ("C100", 0.22),
    ("C125", 0.17),
    ("D6", 1.82),
    ("D10", 1.09),
    ("D16", 0.68),
    ("D20", 0.55),
    ("D25", 0.44),
    ("D32", 0.34),
    ("D40", 0.27),
    ("D50", 0.22),
    ("D63", 0.17),
    ("D80", 0.14),
    ("D100", 0.11),
    ("D125", 0.09),
];

/// Table 41.2, 0.4 s disconnection, `Cmin = 0.95`. Ids are `<standard>-<amps>`.
const FUSE_MAX_ZS_TABLE: &[(&str, f64)] = &[
    ("BS88-6", 7.80),
    ("BS88-10", 4.65),
    ("BS88-16", 2.43),
    ("BS88-20", 1.68),
    ("BS88-25", 1.29),
    ("BS88-32", 0.99),
    ("BS88-40", 0.75),
    ("BS88-50", 0.57),
    ("BS88-63", 0.44),
    ("BS1361-5", 9.83),
    ("BS1361-15", 2.73),
    ("BS1361-20", 1.68),
    ("BS1361-30", 1.04),
    ("BS1361-45", 0.53),
    ("BS3036-5", 9.10),
    ("BS3036-15", 2.64),
    ("BS3036-20", 1.77),
    ("BS3036-30", 1.09),
];

/// Zs reading that should not be exceeded at ambient temperature, rounded to
/// the milliohm so that a reading equal to the printed limit passes.
#[must_use]
pub fn get_80_percent_zs(max_zs: f64) -> f64 {
    (max_zs * AMBIENT_CORRECTION_FACTOR * 1000.0).round() / 1000.0
}

// ---------------------------------------------------------------------------
// DeviceId
// ---------------------------------------------------------------------------

/// Protective device identifier, whitespace-stripped and upper-cased.
///
/// Three shapes are understood: MCBs as `<curve><amps>` (`B32`), RCBOs as
/// `RCBO-<curve><amps>` (`RCBO-B32`, sharing the MCB limits) and fuses as
/// `<standard>-<amps>` (`BS88-32`, `BS3036-30`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading curve letter of an MCB or RCBO id.
    #[must_use]
    pub fn curve(&self) -> Option<char> {
        let breaker = self.breaker_part();
        let mut chars = breaker.chars();
        let curve = chars.next()?;
        let rest = chars.as_str();
        let is_breaker = curve.is_ascii_alphabetic()
            && !rest.is_empty()
            && rest.chars().all(|c| c.is_ascii_digit());
        is_breaker.then_some(curve)
    }

    /// Fuse standard of a `<standard>-<amps>` id, e.g. `BS88`.
    #[must_use]
    pub fn fuse_standard(&self) -> Option<&str> {
        let (standard, amps) = self.0.rsplit_once('-')?;
        let is_fuse = standard.starts_with("BS") && amps.parse::<u32>().is_ok();
        is_fuse.then_some(standard)
    }

    /// Rated current in amps, for any of the recognised shapes.
    #[must_use]
    pub fn rating_amps(&self) -> Option<u32> {
        if self.curve().is_some() {
            return self.breaker_part()[1..].parse().ok();
        }
        self.fuse_standard()?;
        self.0.rsplit_once('-')?.1.parse().ok()
    }

    /// The MCB id an RCBO shares its limits with.
    #[must_use]
    pub fn rcbo_equivalent(&self) -> Option<Self> {
        let breaker = self.0.strip_prefix("RCBO")?.trim_start_matches('-');
        let id = Self(breaker.to_string());
        id.curve().map(|_| id)
    }

    fn breaker_part(&self) -> &str {
        self.0
            .strip_prefix("RCBO")
            .map_or(self.0.as_str(), |rest| rest.trim_start_matches('-'))
    }
}

impl FromStr for DeviceId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(CoreError::InvalidDevice(s.to_string()));
        }
        Ok(Self(normalized))
    }
}

impl DeviceId {
    pub(crate) fn fallback() -> Self {
        Self(FALLBACK_DEVICE.to_string())
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// RCD ratings
// ---------------------------------------------------------------------------

/// Rated residual operating current of an RCD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum RcdRating {
    #[default]
    Ma30,
    Ma100,
    Ma300,
    Ma500,
}

impl RcdRating {
    pub const ALL: [Self; 4] = [Self::Ma30, Self::Ma100, Self::Ma300, Self::Ma500];

    #[must_use]
    pub const fn milliamps(self) -> u32 {
        match self {
            Self::Ma30 => 30,
            Self::Ma100 => 100,
            Self::Ma300 => 300,
            Self::Ma500 => 500,
        }
    }

    #[must_use]
    pub fn from_milliamps(milliamps: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.milliamps() == milliamps)
    }
}

impl TryFrom<u32> for RcdRating {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_milliamps(value).ok_or_else(|| CoreError::UnknownValue {
            kind: "RCD rating",
            value: value.to_string(),
        })
    }
}

impl FromStr for RcdRating {
    type Err = CoreError;

    /// Accepts `30`, `30mA`, `30 ma` and `RCD30`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let digits = upper
            .trim_start_matches("RCD")
            .trim_end_matches("MA")
            .trim();
        digits
            .parse::<u32>()
            .ok()
            .and_then(Self::from_milliamps)
            .ok_or_else(|| CoreError::UnknownValue {
                kind: "RCD rating",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for RcdRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mA", self.milliamps())
    }
}

/// Maximum disconnection times for an RCD under test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RcdLimits {
    /// At 1× rated residual current.
    pub max_trip_ms_x1: f64,
    /// At 5× rated residual current.
    pub max_trip_ms_x5: f64,
}

const GENERAL_RCD_LIMITS: RcdLimits = RcdLimits {
    max_trip_ms_x1: 300.0,
    max_trip_ms_x5: 40.0,
};

// ---------------------------------------------------------------------------
// ThresholdTable
// ---------------------------------------------------------------------------

/// One row of the device listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DeviceLimit {
    pub device: DeviceId,
    pub max_zs: f64,
    pub test_zs: f64,
    pub overridden: bool,
}

/// One row of the RCD listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RcdLimitRow {
    pub rating_ma: u32,
    pub max_trip_ms_x1: f64,
    pub max_trip_ms_x5: f64,
}

/// Result of a Zs limit lookup after the fallback policy has been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDevice {
    /// Device whose limits apply: the requested id, or `B32` after a fallback.
    pub device: DeviceId,
    pub max_zs: f64,
    pub fell_back: bool,
}

/// Immutable device → limit mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable {
    max_zs: BTreeMap<DeviceId, f64>,
    overridden: Vec<DeviceId>,
}

impl ThresholdTable {
    /// The built-in BS 7671 table.
    #[must_use]
    pub fn bs7671() -> Self {
        let max_zs = MAX_ZS_TABLE
            .iter()
            .chain(FUSE_MAX_ZS_TABLE)
            .map(|(id, zs)| (DeviceId((*id).to_string()), *zs))
            .collect();
        Self {
            max_zs,
            overridden: Vec::new(),
        }
    }

    /// Add or replace device limits.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a non-finite or non-positive limit.
    pub fn with_overrides<I, K>(mut self, overrides: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        for (raw, max_zs) in overrides {
            let device: DeviceId = raw.as_ref().parse()?;
            if !max_zs.is_finite() || max_zs <= 0.0 {
                return Err(CoreError::Validation(format!(
                    "max Zs override for {device} must be a positive number, got {max_zs}"
                )));
            }
            tracing::debug!(%device, max_zs, "overriding max Zs");
            self.max_zs.insert(device.clone(), max_zs);
            if !self.overridden.contains(&device) {
                self.overridden.push(device);
            }
        }
        Ok(self)
    }

    /// Exact lookup, no fallback.
    #[must_use]
    pub fn max_zs(&self, device: &str) -> Option<f64> {
        let id: DeviceId = device.parse().ok()?;
        self.max_zs.get(&id).copied()
    }

    /// Lookup that never fails. An RCBO without its own entry takes the
    /// limits of its curve and rating; unknown or malformed ids use `B32`.
    #[must_use]
    pub fn resolve_max_zs(&self, device: &str) -> ResolvedDevice {
        if let Ok(id) = device.parse::<DeviceId>() {
            let max_zs = self.max_zs.get(&id).copied().or_else(|| {
                id.rcbo_equivalent()
                    .and_then(|breaker| self.max_zs.get(&breaker).copied())
            });
            if let Some(max_zs) = max_zs {
                return ResolvedDevice {
                    device: id,
                    max_zs,
                    fell_back: false,
                };
            }
        }

        tracing::debug!(
            device,
            fallback = FALLBACK_DEVICE,
            "unknown device, using fallback limits"
        );
        let fallback = DeviceId::fallback();
        let max_zs = self.max_zs.get(&fallback).copied().unwrap_or(B32_MAX_ZS);
        ResolvedDevice {
            device: fallback,
            max_zs,
            fell_back: true,
        }
    }

    /// All RCD ratings currently share the general-purpose limits.
    #[must_use]
    pub const fn rcd_limits(&self, _rating: RcdRating) -> RcdLimits {
        GENERAL_RCD_LIMITS
    }

    #[must_use]
    pub fn rcd_rows(&self) -> Vec<RcdLimitRow> {
        RcdRating::ALL
            .into_iter()
            .map(|rating| {
                let limits = self.rcd_limits(rating);
                RcdLimitRow {
                    rating_ma: rating.milliamps(),
                    max_trip_ms_x1: limits.max_trip_ms_x1,
                    max_trip_ms_x5: limits.max_trip_ms_x5,
                }
            })
            .collect()
    }

    /// Device rows, optionally restricted to one curve letter. Breakers come
    /// first by curve and rating, then fuses by standard and rating.
    #[must_use]
    pub fn devices(&self, curve: Option<char>) -> Vec<DeviceLimit> {
        let curve = curve.map(|c| c.to_ascii_uppercase());
        let mut rows: Vec<DeviceLimit> = self
            .max_zs
            .iter()
            .filter(|(id, _)| curve.is_none() || id.curve() == curve)
            .map(|(id, max_zs)| DeviceLimit {
                device: id.clone(),
                max_zs: *max_zs,
                test_zs: get_80_percent_zs(*max_zs),
                overridden: self.overridden.contains(id),
            })
            .collect();
        rows.sort_by(|a, b| listing_key(&a.device).cmp(&listing_key(&b.device)));
        rows
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::bs7671()
    }
}

fn listing_key(id: &DeviceId) -> (bool, Option<char>, Option<&str>, Option<u32>, &str) {
    (
        id.curve().is_none(),
        id.curve(),
        id.fuse_standard(),
        id.rating_amps(),
        id.as_str(),
    )
}
