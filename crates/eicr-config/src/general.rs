//! General application configuration.

use serde::{Deserialize, Serialize};

/// Output formats the CLI understands.
pub const OUTPUT_FORMATS: [&str; 3] = ["json", "table", "raw"];

fn default_format() -> String {
    String::from("json")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Output format used when `--format` is not given.
    #[serde(default = "default_format")]
    pub default_format: String,

    /// Whether `eicr report` exits non-zero for a non-compliant report by default.
    #[serde(default)]
    pub strict: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            strict: false,
        }
    }
}
