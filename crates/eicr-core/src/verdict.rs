use schemars::JsonSchema;
use serde::Serialize;

use crate::enums::Severity;

/// Outcome of validating one reading.
///
/// Only constructible through [`Verdict::info`], [`Verdict::warning`] and
/// [`Verdict::error`], so `is_valid` always agrees with `severity`.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Verdict {
    is_valid: bool,
    severity: Severity,
    message: String,
    standard_reference: Option<String>,
}

impl Verdict {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            is_valid: severity.is_valid(),
            severity,
            message: message.into(),
            standard_reference: None,
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Pass-through verdict for steps no rule applies to.
    #[must_use]
    pub fn test_completed() -> Self {
        Self::info("Test completed")
    }

    /// Attach the regulation or table the verdict was judged against.
    #[must_use]
    pub fn citing(mut self, reference: impl Into<String>) -> Self {
        self.standard_reference = Some(reference.into());
        self
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn standard_reference(&self) -> Option<&str> {
        self.standard_reference.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_follows_severity() {
        assert!(Verdict::info("ok").is_valid());
        assert!(Verdict::warning("hmm").is_valid());
        assert!(!Verdict::error("bad").is_valid());
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let verdict = Verdict::error("too high").citing("BS 7671 Table 41.3");
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["severity"], "error");
        assert_eq!(json["message"], "too high");
        assert_eq!(json["standard_reference"], "BS 7671 Table 41.3");
    }

    #[test]
    fn reference_is_optional() {
        let json = serde_json::to_value(Verdict::info("Test completed")).unwrap();
        assert!(json["standard_reference"].is_null());
    }
}
