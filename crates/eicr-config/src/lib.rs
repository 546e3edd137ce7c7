//! # eicr-config
//!
//! Layered configuration loading for eicr using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`EICR_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.eicr/config.toml`
//! 4. User-level `~/.config/eicr/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `EICR_VALIDATION__DEFAULT_DEVICE` -> `validation.default_device`,
//! `EICR_GENERAL__STRICT` -> `general.strict`, and
//! `EICR_VALIDATION__DEVICE_OVERRIDES__B32` -> `validation.device_overrides.b32`.
//!
//! # Usage
//!
//! ```no_run
//! use eicr_config::EicrConfig;
//!
//! let config = EicrConfig::load_with_dotenv(None).expect("config");
//! let validator = config.threshold_validator().expect("valid thresholds");
//! ```

mod error;
mod general;
mod validation;

pub use error::ConfigError;
pub use general::{GeneralConfig, OUTPUT_FORMATS};
pub use validation::ValidationConfig;

use std::path::{Path, PathBuf};

use eicr_core::thresholds::{DeviceId, RcdRating, ThresholdTable};
use eicr_core::validator::ThresholdValidator;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EicrConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl EicrConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and check it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if `extra` does not exist, a
    /// figment error for malformed sources, or [`ConfigError::InvalidValue`]
    /// from [`Self::validate`].
    pub fn load(extra: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = extra {
            if !path.exists() {
                return Err(ConfigError::MissingFile {
                    path: path.display().to_string(),
                });
            }
        }

        let config: Self = Self::figment(extra).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(extra: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env is not an error.
        let _ = dotenvy::dotenv();
        Self::load(extra)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".eicr/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("EICR_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("eicr").join("config.toml"))
    }

    /// Check values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.default_device()?;
        self.default_rcd_rating()?;
        self.threshold_table()?;

        if !OUTPUT_FORMATS.contains(&self.general.default_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.default_format".into(),
                reason: format!(
                    "'{}' is not one of {}",
                    self.general.default_format,
                    OUTPUT_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }

    /// Parsed `validation.default_device`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a blank device id.
    pub fn default_device(&self) -> Result<DeviceId, ConfigError> {
        self.validation
            .default_device
            .parse::<DeviceId>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "validation.default_device".into(),
                reason: e.to_string(),
            })
    }

    /// Parsed `validation.default_rcd_rating_ma`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for ratings other than 30/100/300/500 mA.
    pub fn default_rcd_rating(&self) -> Result<RcdRating, ConfigError> {
        RcdRating::try_from(self.validation.default_rcd_rating_ma).map_err(|e| {
            ConfigError::InvalidValue {
                field: "validation.default_rcd_rating_ma".into(),
                reason: e.to_string(),
            }
        })
    }

    /// The built-in table with `validation.device_overrides` applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a malformed or non-positive override.
    pub fn threshold_table(&self) -> Result<ThresholdTable, ConfigError> {
        ThresholdTable::bs7671()
            .with_overrides(
                self.validation
                    .device_overrides
                    .iter()
                    .map(|(device, max_zs)| (device.as_str(), *max_zs)),
            )
            .map_err(|e| ConfigError::InvalidValue {
                field: "validation.device_overrides".into(),
                reason: e.to_string(),
            })
    }

    /// A validator carrying this configuration's table and defaults.
    ///
    /// # Errors
    ///
    /// Propagates the errors of the accessors it combines.
    pub fn threshold_validator(&self) -> Result<ThresholdValidator, ConfigError> {
        Ok(ThresholdValidator::new(self.threshold_table()?)
            .with_default_device(self.default_device()?)
            .with_default_rcd_rating(self.default_rcd_rating()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EicrConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.validation.default_device, "B32");
        assert!(!config.general.strict);
    }

    #[test]
    fn figment_builds_without_files() {
        let config: EicrConfig = EicrConfig::figment(None)
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.validation.default_rcd_rating_ma, 30);
        assert_eq!(config.general.default_format, "json");
    }

    #[test]
    fn rejects_unknown_rcd_rating() {
        let mut config = EicrConfig::default();
        config.validation.default_rcd_rating_ma = 10;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_rcd_rating_ma"));
    }

    #[test]
    fn rejects_blank_default_device() {
        let mut config = EicrConfig::default();
        config.validation.default_device = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "validation.default_device"
        ));
    }

    #[test]
    fn rejects_unknown_output_format() {
        let mut config = EicrConfig::default();
        config.general.default_format = "xml".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validator_applies_overrides() {
        let mut config = EicrConfig::default();
        config.validation.device_overrides.insert("b32".into(), 1.44);
        let validator = config.threshold_validator().expect("valid config");
        assert_eq!(validator.table().max_zs("B32"), Some(1.44));
    }
}
