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
    Ok(match serde_json::to_value(value)? {
        Value::Array(items) => render_rows(&items),
        // `{ "ideas": [...] }` style responses render as the list itself.
        Value::Object(map) if is_list_envelope(&map) => match map.into_iter().next() {
            Some((_, Value::Array(items))) => render_rows(&items),
            _ => String::from("(no rows)"),
        },
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            table::render_entity_table(&["key", "value"], &rows, table_options())
        }
        scalar => table::render_entity_table(&["value"], &[vec![value_to_cell(&scalar)]], table_options()),
    })
}

fn is_list_envelope(map: &Map<String, Value>) -> bool {
    map.len() == 1 && map.values().all(Value::is_array)
}

fn render_rows(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items.iter().map(|item| vec![value_to_cell(item)]).collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, table_options());
    }

    // Union of keys across rows.
    let mut headers = Vec::<&str>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&headers, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Object(map) if map.values().all(|v| !v.is_object() && !v.is_array()) => map
            .iter()
            .map(|(key, value)| format!("{key}={}", value_to_cell(value)))
            .collect::<Vec<_>>()
            .join(" "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        value: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert_eq!(parsed["value"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("key")));
        assert!(out.contains("id"));
    }

    #[test]
    fn list_envelope_renders_one_row_per_item() {
        let value = json!({
            "ideas": [
                {"title": "Night sky", "author": "Lin Chen", "avatar": {"initials": "LC", "color": "#3b82f6"}},
                {"title": "Palette", "author": "Anonymous", "avatar": {"initials": "A", "color": "#ef4444"}},
            ]
        });
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("author"));
        assert!(lines[0].contains("title"));
        assert!(lines[2].contains("initials=LC"));
    }

    #[test]
    fn empty_list_envelope_says_so() {
        let out = render(&json!({"ideas": []}), OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
