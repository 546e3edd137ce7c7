//! Threshold validation settings.

use std::collections::BTreeMap;

use eicr_core::thresholds::{DEFAULT_RCD_RATING_MA, FALLBACK_DEVICE};
use serde::{Deserialize, Serialize};

fn default_device() -> String {
    FALLBACK_DEVICE.to_string()
}

const fn default_rcd_rating_ma() -> u32 {
    DEFAULT_RCD_RATING_MA
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Device assumed for Zs readings that do not name one (e.g., "B32").
    #[serde(default = "default_device")]
    pub default_device: String,

    /// RCD rating in mA assumed for trip-time readings that do not name one.
    #[serde(default = "default_rcd_rating_ma")]
    pub default_rcd_rating_ma: u32,

    /// Extra or replacement max Zs limits in ohms, keyed by device id.
    #[serde(default)]
    pub device_overrides: BTreeMap<String, f64>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            default_device: default_device(),
            default_rcd_rating_ma: default_rcd_rating_ma(),
            device_overrides: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ValidationConfig::default();
        assert_eq!(config.default_device, "B32");
        assert_eq!(config.default_rcd_rating_ma, 30);
        assert!(config.device_overrides.is_empty());
    }
}
