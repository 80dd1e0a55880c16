use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(&serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table(value: &Value) -> anyhow::Result<String> {
    Ok(match value {
        Value::Array(items) => render_rows(items),
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            table::render_table(&["field", "value"], &rows, options())
        }
        scalar => cell(scalar),
    })
}

fn render_rows(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    if !items.iter().all(Value::is_object) {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, options());
    }

    let headers = columns(items.iter().filter_map(Value::as_object));
    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::render_table(&header_refs, &rows, options())
}

/// Union of keys, `id` first. `_id` is dropped when `id` is present since
/// normalized records carry both with the same value.
fn columns<'a>(maps: impl Iterator<Item = &'a Map<String, Value>>) -> Vec<String> {
    let mut headers = Vec::<String>::new();
    for map in maps {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.iter().any(|key| key == "id") {
        headers.retain(|key| key != "_id");
    }
    headers.sort_by_key(|key| (key != "id", key.clone()));
    headers
}

/// One-line cell text. Populated references show their name, nested
/// collections their size.
fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => format!("[{}]", items.len()),
        Value::Object(map) => ["nombre", "username", "_id", "id"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map_or_else(|| Value::Object(map.clone()).to_string(), ToString::to_string),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::render;
    use crate::cli::OutputFormat;

    #[test]
    fn json_render_is_pretty() {
        let out = render(&json!({"id": "l1"}), OutputFormat::Json).unwrap();
        assert!(out.contains('\n'));
        assert_eq!(serde_json::from_str::<serde_json::Value>(&out).unwrap()["id"], "l1");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&json!({"id": "l1", "nombre": "Docencia"}), OutputFormat::Raw).unwrap();
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_puts_id_first_and_hides_mongo_id() {
        let rows = json!([
            {"_id": "o1", "id": "o1", "nombre": "Acreditar", "lineaId": {"_id": "l1", "nombre": "Docencia"}},
            {"_id": "o2", "id": "o2", "nombre": "Publicar", "lineaId": "l2"}
        ]);
        let out = render(&rows, OutputFormat::Table).unwrap();
        let lines = out.lines().collect::<Vec<_>>();
        assert!(lines[0].starts_with("id"));
        assert!(!lines[0].contains("_id"));
        assert!(lines[2].contains("Docencia"));
        assert!(lines[3].contains("l2"));
    }

    #[test]
    fn table_summarizes_nested_lists() {
        let out = render(&json!([{"id": "p1", "actividades": [{}, {}]}]), OutputFormat::Table)
            .unwrap();
        assert!(out.contains("[2]"));
    }

    #[test]
    fn table_of_empty_list() {
        assert_eq!(render(&json!([]), OutputFormat::Table).unwrap(), "(no rows)");
    }

    #[test]
    fn table_for_object_lists_fields() {
        let out = render(&json!({"authenticated": true}), OutputFormat::Table).unwrap();
        assert!(out.starts_with("field"));
        assert!(out.contains("authenticated"));
    }
}
