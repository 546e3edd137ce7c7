use std::path::Path;

use anyhow::Context;
use eicr_config::EicrConfig;

pub fn load_config(extra: Option<&Path>) -> anyhow::Result<EicrConfig> {
    let config = EicrConfig::load_with_dotenv(extra).context("failed to load eicr configuration")?;

    tracing::debug!(
        default_device = %config.validation.default_device,
        default_rcd_rating_ma = config.validation.default_rcd_rating_ma,
        overrides = config.validation.device_overrides.len(),
        "configuration loaded"
    );

    Ok(config)
}
