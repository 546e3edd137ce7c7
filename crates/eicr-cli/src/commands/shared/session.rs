use std::path::Path;

use anyhow::Context;
use eicr_core::session::SessionFile;
use eicr_schema::SchemaRegistry;

/// Read a session file, validate it against the `session_file` schema and
/// deserialise it. `.toml` files are parsed as TOML, anything else as JSON.
pub fn load_session(path: &Path) -> anyhow::Result<SessionFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read session file {}", path.display()))?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let value: serde_json::Value = if is_toml {
        let parsed: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("invalid TOML in {}", path.display()))?;
        serde_json::to_value(parsed)?
    } else {
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid JSON in {}", path.display()))?
    };

    let session: SessionFile = SchemaRegistry::new()
        .parse("session_file", value)
        .with_context(|| format!("invalid session file {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        steps = session.flow.steps.len(),
        results = session.results.len(),
        observations = session.observations.len(),
        "session loaded"
    );

    Ok(session)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use eicr_core::enums::{ObservationCode, TestKind};
    use pretty_assertions::assert_eq;

    use super::load_session;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn loads_json_session() {
        let file = write_temp(
            ".json",
            r#"{
                "flow": { "id": "eicr-basic", "title": "Basic", "steps": [ { "id": "r1-r2", "title": "Continuity" } ] },
                "results": { "r1-r2": { "kind": "continuity", "value": 0.4, "unit": "Ω" } }
            }"#,
        );

        let session = load_session(file.path()).expect("session loads");
        assert_eq!(session.flow.id, "eicr-basic");
        assert_eq!(session.results["r1-r2"].kind, TestKind::Continuity);
        assert!(session.observations.is_empty());
    }

    #[test]
    fn loads_toml_session() {
        let file = write_temp(
            ".toml",
            r#"
[flow]
id = "eicr-basic"
title = "Basic"

[[flow.steps]]
id = "zs-test"
title = "Earth fault loop"

[results.zs-test]
kind = "earth_fault_loop"
value = 1.2
device_rating = "B32"

[[observations]]
item = "5.12"
description = "Socket outlets lack additional protection"
code = "C2"
"#,
        );

        let session = load_session(file.path()).expect("session loads");
        assert_eq!(session.flow.steps[0].id, "zs-test");
        assert_eq!(session.results["zs-test"].value, Some(1.2));
        assert_eq!(session.observations[0].code, ObservationCode::C2);
    }

    #[test]
    fn schema_violations_are_reported() {
        let file = write_temp(
            ".json",
            r#"{ "flow": { "id": "f", "title": "F", "steps": [] }, "results": { "x": { "kind": "megger" } } }"#,
        );

        let err = load_session(file.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("invalid session file"), "{message}");
        assert!(message.contains("Validation failed"), "{message}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_session(std::path::Path::new("/nonexistent/session.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read session file"));
    }
}
