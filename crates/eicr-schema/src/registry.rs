//! Central schema registry for eicr file formats and responses.
//!
//! The `SchemaRegistry` builds JSON Schemas from eicr-core types at
//! construction time using [`schemars::schema_for!`] and validates via
//! `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;
use serde::de::DeserializeOwned;

use crate::error::SchemaError;

/// Named JSON Schemas for every serialised eicr-core type.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Inputs ---
        register!(schemas, "test_reading", eicr_core::reading::TestReading);
        register!(schemas, "test_step", eicr_core::report::TestStep);
        register!(schemas, "test_flow", eicr_core::report::TestFlow);
        register!(
            schemas,
            "observation",
            eicr_core::observations::Observation
        );
        register!(schemas, "session_file", eicr_core::session::SessionFile);

        // --- Outputs ---
        register!(schemas, "verdict", eicr_core::verdict::Verdict);
        register!(
            schemas,
            "compliance_report",
            eicr_core::report::ComplianceReport
        );
        register!(schemas, "assessment", eicr_core::observations::Assessment);
        register!(schemas, "device_limit", eicr_core::thresholds::DeviceLimit);

        // --- CLI responses ---
        register!(
            schemas,
            "validate_response",
            eicr_core::responses::ValidateResponse
        );
        register!(
            schemas,
            "report_response",
            eicr_core::responses::ReportResponse
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` carrying every validator message.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator =
            jsonschema::validator_for(schema).map_err(|e| SchemaError::Compile(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e} at '{}'", e.instance_path))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Validate `instance` against `name`, then deserialise it.
    ///
    /// # Errors
    ///
    /// Anything [`Self::validate`] returns, or `SchemaError::Deserialize`.
    pub fn parse<T: DeserializeOwned>(
        &self,
        name: &str,
        instance: serde_json::Value,
    ) -> Result<T, SchemaError> {
        self.validate(name, &instance)?;
        Ok(serde_json::from_value(instance)?)
    }

    /// List all registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
