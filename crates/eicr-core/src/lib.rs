//! # eicr-core
//!
//! Domain types and BS 7671 threshold validation for EICR test results.
//!
//! This crate provides the foundational types shared across all eicr crates:
//! - Test kinds, severities, statuses and observation codes
//! - The immutable BS 7671 limit tables
//! - `ThresholdValidator`, which turns a reading into a verdict
//! - Step-id resolution for walkthrough flows
//! - Compliance reports and observation assessments
//! - Session file and CLI response types
//!
//! ```
//! use eicr_core::enums::{Severity, TestKind};
//! use eicr_core::reading::TestReading;
//! use eicr_core::validator::ThresholdValidator;
//!
//! let validator = ThresholdValidator::default();
//! let zs = TestReading::new(TestKind::EarthFaultLoop).with_value(1.2);
//! let verdict = validator.validate_earth_fault_loop(&zs, "B32");
//! assert_eq!(verdict.severity(), Severity::Warning);
//! ```

pub mod enums;
pub mod errors;
pub mod observations;
pub mod reading;
pub mod report;
pub mod responses;
pub mod session;
pub mod steps;
pub mod thresholds;
pub mod validator;
pub mod verdict;
