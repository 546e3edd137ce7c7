//! Serde roundtrip and JsonSchema validation tests for the file-facing types.

use eicr_core::enums::{ObservationCode, TestKind, TestStatus};
use eicr_core::observations::{Observation, assess_observations};
use eicr_core::reading::TestReading;
use eicr_core::report::{SessionResults, TestFlow, TestStep, build_compliance_report};
use eicr_core::responses::{ReportResponse, ValidateResponse};
use eicr_core::session::SessionFile;
use eicr_core::validator::ThresholdValidator;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_flow() -> TestFlow {
    TestFlow {
        id: "eicr-domestic".into(),
        title: "Domestic EICR".into(),
        steps: vec![
            TestStep::new("r1-r2", "Continuity"),
            TestStep::new("zs-measurement", "Zs"),
            TestStep::new("kitchen-ring", "Kitchen ring end-to-end").with_kind(TestKind::Continuity),
        ],
    }
}

fn sample_results() -> SessionResults {
    let mut results = SessionResults::new();
    results.insert(
        "r1-r2".into(),
        TestReading::new(TestKind::Continuity)
            .with_value(0.42)
            .with_circuit_type("Sockets"),
    );
    results.insert(
        "zs-measurement".into(),
        TestReading::new(TestKind::EarthFaultLoop)
            .with_value(0.81)
            .with_device("B32"),
    );
    results
}

fn sample_observations() -> Vec<Observation> {
    vec![
        Observation {
            item: "3.5".into(),
            description: "Main earthing conductor disconnected at MET".into(),
            code: ObservationCode::C1,
            location: Some("Consumer unit".into()),
        },
        Observation {
            item: "4.9".into(),
            description: "Circuit chart requires updating".into(),
            code: ObservationCode::C3,
            location: None,
        },
    ]
}

roundtrip_and_validate!(
    reading_roundtrip,
    TestReading,
    TestReading::new(TestKind::Polarity).with_status(TestStatus::Completed)
);

roundtrip_and_validate!(flow_roundtrip, TestFlow, sample_flow());

roundtrip_and_validate!(
    session_roundtrip,
    SessionFile,
    SessionFile {
        flow: sample_flow(),
        results: sample_results(),
        observations: sample_observations(),
    }
);

roundtrip_and_validate!(
    report_response_roundtrip,
    ReportResponse,
    ReportResponse {
        flow_id: "eicr-domestic".into(),
        report: build_compliance_report(&sample_flow(), &sample_results()),
        assessment: Some(assess_observations(&sample_observations())),
    }
);

#[test]
fn validate_response_matches_schema() {
    let reading = TestReading::new(TestKind::RcdTrip).with_value(310.0);
    let response = ValidateResponse {
        judged_as: Some(TestKind::RcdTrip),
        step_id: None,
        verdict: ThresholdValidator::default().validate(&reading),
        value: reading.measured(),
        unit: reading.unit,
    };

    let schema = serde_json::to_value(schema_for!(ValidateResponse)).unwrap();
    let instance = serde_json::to_value(&response).unwrap();
    let errors = validate_against_schema(&schema, &instance);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(instance["verdict"]["severity"], "error");
}

#[test]
fn session_schema_rejects_unknown_code() {
    let schema = serde_json::to_value(schema_for!(SessionFile)).unwrap();
    let instance = serde_json::json!({
        "flow": { "id": "f", "title": "F", "steps": [] },
        "observations": [ { "item": "1.1", "description": "x", "code": "C4" } ]
    });
    assert!(!validate_against_schema(&schema, &instance).is_empty());
}
