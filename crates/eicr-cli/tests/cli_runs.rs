//! End-to-end runs of the `eicr` binary in an isolated working directory.

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

const SESSION: &str = r#"{
    "flow": {
        "id": "eicr-basic",
        "title": "Basic EICR",
        "steps": [
            { "id": "r1-r2", "title": "Continuity" },
            { "id": "zs-test", "title": "Earth fault loop" },
            { "id": "rcd-test", "title": "RCD" },
            { "id": "visual", "title": "Visual inspection" }
        ]
    },
    "results": {
        "r1-r2": { "kind": "continuity", "value": 0.4, "unit": "Ω" },
        "zs-test": { "kind": "earth_fault_loop", "value": 1.5, "unit": "Ω", "device_rating": "B32" },
        "rcd-test": { "kind": "rcd_trip", "value": 22.0, "unit": "ms", "device_rating": "30" }
    },
    "observations": [
        { "item": "5.12", "description": "Socket outlets lack additional protection", "code": "C2" },
        { "item": "3.1", "description": "Consumer unit label faded", "code": "C3" }
    ]
}"#;

fn eicr(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_eicr"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("EICR_LOG")
        .env_remove("EICR_GENERAL__STRICT")
        .env_remove("EICR_GENERAL__DEFAULT_FORMAT")
        .output()
        .expect("eicr should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn validate_prints_verdict() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = eicr(
        dir.path(),
        &["validate", "--kind", "earth_fault_loop", "--value", "1.2", "--device", "B32"],
    );

    assert!(out.status.success());
    let json = stdout_json(&out);
    assert_eq!(json["verdict"]["severity"], "warning");
    assert_eq!(json["verdict"]["standard_reference"], "BS 7671 Regulation 643.7.2");
}

#[test]
fn dispatch_unknown_step_passes_through() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = eicr(dir.path(), &["dispatch", "visual-inspection", "--value", "5"]);

    assert!(out.status.success());
    let json = stdout_json(&out);
    assert_eq!(json["judged_as"], serde_json::Value::Null);
    assert_eq!(json["verdict"]["message"], "Test completed");
    assert_eq!(json["verdict"]["is_valid"], true);
    assert_eq!(json["value"], 5.0);
    assert_eq!(json["unit"], "");
}

#[test]
fn dispatch_known_step_judges_fuse_reading() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = eicr(
        dir.path(),
        &["dispatch", "zs-test", "--value", "1.2", "--device", "BS 3036-30"],
    );

    assert!(out.status.success());
    let json = stdout_json(&out);
    assert_eq!(json["judged_as"], "earth_fault_loop");
    assert_eq!(json["unit"], "Ω");
    assert_eq!(json["verdict"]["severity"], "error");
    assert_eq!(
        json["verdict"]["message"],
        "Zs of 1.2Ω exceeds the maximum of 1.09Ω for BS3036-30"
    );
}

#[test]
fn report_is_non_compliant_but_exits_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("session.json"), SESSION).expect("write session");

    let out = eicr(dir.path(), &["report", "session.json"]);

    assert_eq!(out.status.code(), Some(0));
    let json = stdout_json(&out);
    assert_eq!(json["flow_id"], "eicr-basic");
    assert_eq!(json["report"]["overall_compliance"], false);
    assert_eq!(json["report"]["critical_issues"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["assessment"]["overall"], "unsatisfactory");
}

#[test]
fn strict_report_exits_two() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("session.json"), SESSION).expect("write session");

    let out = eicr(dir.path(), &["report", "session.json", "--strict"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn project_config_enables_strict() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("session.json"), SESSION).expect("write session");
    std::fs::create_dir(dir.path().join(".eicr")).expect("mkdir");
    std::fs::write(
        dir.path().join(".eicr/config.toml"),
        "[general]\nstrict = true\n",
    )
    .expect("write config");

    let out = eicr(dir.path(), &["report", "session.json"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn config_override_changes_device_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("site.toml"),
        "[validation.device_overrides]\nB32 = 1.60\n",
    )
    .expect("write config");

    let out = eicr(
        dir.path(),
        &["--config", "site.toml", "validate", "--kind", "earth_fault_loop", "--value", "1.5"],
    );

    assert!(out.status.success());
    assert_eq!(stdout_json(&out)["verdict"]["severity"], "warning");
}

#[test]
fn devices_lists_filtered_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = eicr(dir.path(), &["devices", "--curve", "c", "--format", "raw"]);

    assert!(out.status.success());
    let rows = stdout_json(&out);
    let rows = rows.as_array().expect("array");
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|row| row["device"].as_str().is_some_and(|d| d.starts_with('C'))));
}

#[test]
fn assess_reads_toml_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("session.toml"),
        r#"
[flow]
id = "eicr-basic"
title = "Basic"
steps = []

[[observations]]
item = "3.1"
description = "Consumer unit label faded"
code = "C3"
"#,
    )
    .expect("write session");

    let out = eicr(dir.path(), &["assess", "session.toml"]);

    assert!(out.status.success());
    let json = stdout_json(&out);
    assert_eq!(json["overall"], "satisfactory");
    assert_eq!(json["counts"]["c3"], 1);
    assert_eq!(json["legend"][0]["code"], "C3");
    assert_eq!(
        json["legend"][0]["meaning"],
        "Improvement recommended - Does not meet current standard."
    );
}

#[test]
fn invalid_session_exits_one_with_message() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("bad.json"), r#"{ "results": {} }"#).expect("write");

    let out = eicr(dir.path(), &["report", "bad.json"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("eicr error:"), "{stderr}");
    assert!(stderr.contains("invalid session file"), "{stderr}");
}

#[test]
fn schema_export_lists_and_prints() {
    let dir = tempfile::tempdir().expect("tempdir");

    let list = eicr(dir.path(), &["schema", "--list"]);
    assert!(list.status.success());
    let names = stdout_json(&list);
    assert!(
        names
            .as_array()
            .expect("array")
            .iter()
            .any(|n| n == "session_file")
    );

    let schema = eicr(dir.path(), &["schema", "verdict"]);
    assert!(schema.status.success());
    assert!(stdout_json(&schema)["properties"]["severity"].is_object());

    let missing = eicr(dir.path(), &["schema", "nope"]);
    assert_eq!(missing.status.code(), Some(1));
}
