use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let mut rows = Vec::new();
            flatten_into("", &map, &mut rows);
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
    }
}

/// Nested objects become dotted keys (`verdict.severity`).
fn flatten_into(prefix: &str, map: &Map<String, Value>, rows: &mut Vec<Vec<String>>) {
    for (key, value) in map {
        let key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => flatten_into(&key, inner, rows),
            other => rows.push(vec![key, value_to_cell(other)]),
        }
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, table_options());
    }

    let mut headers = Vec::<String>::new();
    for item in items {
        if let Some(map) = item.as_object() {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.is_empty() => String::from("(none)"),
        Value::Array(items) if !items.iter().any(|i| i.is_object() || i.is_array()) => items
            .iter()
            .map(value_to_cell)
            .collect::<Vec<_>>()
            .join("; "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use eicr_core::enums::TestKind;
    use eicr_core::responses::ValidateResponse;
    use eicr_core::thresholds::ThresholdTable;
    use eicr_core::verdict::Verdict;
    use serde::Serialize;

    use super::{render, table::render_entity_table};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        value: u32,
    }

    fn response() -> ValidateResponse {
        ValidateResponse {
            judged_as: Some(TestKind::EarthFaultLoop),
            step_id: None,
            value: Some(1.5),
            unit: "Ω".into(),
            verdict: Verdict::error("Zs too high").citing("BS 7671 Table 41.3"),
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&response(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["judged_as"], "earth_fault_loop");
        assert_eq!(parsed["verdict"]["is_valid"], false);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_flattens_nested_objects() {
        let out = render(&response(), OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("verdict.severity"));
        assert!(out.contains("verdict.standard_reference"));
        assert!(out.contains("BS 7671 Table 41.3"));
    }

    #[test]
    fn table_render_for_device_rows() {
        let rows = ThresholdTable::bs7671().devices(Some('D'));
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        for column in ["device", "max_zs", "test_zs", "overridden"] {
            assert!(header.contains(column), "missing {column}");
        }
        assert_eq!(out.lines().count(), rows.len() + 2);
        assert!(out.contains("D6"));
    }

    #[test]
    fn string_lists_join_into_one_cell() {
        #[derive(Serialize)]
        struct Lists {
            warnings: Vec<&'static str>,
            critical_issues: Vec<&'static str>,
        }

        let out = render(
            &Lists {
                warnings: vec!["a", "b"],
                critical_issues: vec![],
            },
            OutputFormat::Table,
        )
        .expect("table render should work");
        assert!(out.contains("a; b"));
        assert!(out.contains("(none)"));
    }

    #[test]
    fn table_alignment_handles_mixed_widths() {
        let headers = ["device", "max_zs", "test_zs"];
        let rows = vec![
            vec!["B6".to_string(), "7.28".to_string(), "5.82".to_string()],
            vec!["C125".to_string(), "0.07".to_string(), "0.06".to_string()],
        ];

        let table = render_entity_table(
            &headers,
            &rows,
            super::table::TableOptions {
                max_width: None,
                color: false,
            },
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("device"));
        assert!(lines[1].chars().all(|c| c == '-'));
    }
}
