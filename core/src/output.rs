//! Persisting a decoded body to disk as pretty JSON or CSV.
//!
//! The format is chosen by the output file name's suffix. CSV takes its header
//! from the first row's keys, in that row's order. Later rows are not
//! reconciled against it: a missing key becomes an empty cell and a key the
//! first row does not have is rejected.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Destination file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    /// Pick the format from the file name's suffix. Matching is exact and
    /// case-sensitive; a file named just `.json` counts, `out.JSON` does not.
    pub fn from_path(path: &Path) -> Result<Self, ApiError> {
        let name = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();
        if name.ends_with(".json") {
            Ok(OutputFormat::Json)
        } else if name.ends_with(".csv") {
            Ok(OutputFormat::Csv)
        } else {
            Err(ApiError::UnsupportedOutputFormat(path.to_path_buf()))
        }
    }
}

/// Render `value` with 4-space indentation, keeping key order.
pub fn to_pretty_json(value: &Value) -> Result<String, ApiError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|e| ApiError::Serialization(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Write `value` to `path` in the format its extension selects.
///
/// An unsupported extension fails before the file is touched, as does a
/// body that cannot be laid out as CSV.
pub fn write_output(value: &Value, path: &Path) -> Result<OutputFormat, ApiError> {
    let format = OutputFormat::from_path(path)?;
    match format {
        OutputFormat::Json => write_json(value, path)?,
        OutputFormat::Csv => write_csv(value, path)?,
    }
    tracing::info!(path = %path.display(), ?format, "response written");
    Ok(format)
}

fn write_json(value: &Value, path: &Path) -> Result<(), ApiError> {
    let text = to_pretty_json(value)?;
    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;
    Ok(())
}

fn write_csv(value: &Value, path: &Path) -> Result<(), ApiError> {
    let table = CsvTable::from_value(value)?;
    let mut writer = csv::Writer::from_path(path)?;
    table.write_to(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// A decoded body flattened into a header and string cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// An object is one row; an array is one row per element. An empty array
    /// gives an empty table (no header, no rows).
    pub fn from_value(value: &Value) -> Result<Self, ApiError> {
        let records: Vec<&Map<String, Value>> = match value {
            Value::Object(map) => vec![map],
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    item.as_object().ok_or_else(|| {
                        ApiError::CsvShape(format!("element {index} is not a JSON object"))
                    })
                })
                .collect::<Result<_, _>>()?,
            _ => {
                return Err(ApiError::CsvShape(
                    "response is neither an object nor a list of objects".to_string(),
                ))
            }
        };

        let Some(first) = records.first() else {
            return Ok(Self::default());
        };
        let headers: Vec<String> = first.keys().cloned().collect();

        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if let Some(extra) = record.keys().find(|key| !first.contains_key(key.as_str())) {
                return Err(ApiError::CsvShape(format!(
                    "row {index} has field '{extra}' that is not in the header"
                )));
            }
            rows.push(
                headers
                    .iter()
                    .map(|header| record.get(header).map(cell).unwrap_or_default())
                    .collect(),
            );
        }

        Ok(Self { headers, rows })
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<(), ApiError> {
        if self.headers.is_empty() {
            return Ok(());
        }
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        Ok(())
    }
}

/// Strings are written bare, null is empty, nested values as compact JSON.
fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn format_from_file_name_suffix() {
        assert_eq!(OutputFormat::from_path(Path::new("out.json")).unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("dir/out.csv")).unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path(Path::new(".json")).unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("dir/.csv")).unwrap(), OutputFormat::Csv);
        for bad in ["result.txt", "noext", "out.JSON", "out.json.bak", "json", "dir.json/out"] {
            let err = OutputFormat::from_path(Path::new(bad)).unwrap_err();
            assert!(matches!(err, ApiError::UnsupportedOutputFormat(_)), "{bad}");
        }
    }

    #[test]
    fn pretty_json_uses_four_spaces_and_keeps_order() {
        let value: Value = serde_json::from_str(r#"{"b":1,"a":[true,null]}"#).unwrap();
        let text = to_pretty_json(&value).unwrap();
        assert_eq!(
            text,
            "{\n    \"b\": 1,\n    \"a\": [\n        true,\n        null\n    ]\n}"
        );
    }

    #[test]
    fn json_file_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let value = json!({"userId": 1, "id": 1, "title": "t", "tags": ["a", "b"]});

        assert_eq!(write_output(&value, &path).unwrap(), OutputFormat::Json);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    \"userId\": 1"));
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn bare_suffix_file_name_is_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".json");

        assert_eq!(write_output(&json!({"id": 1}), &path).unwrap(), OutputFormat::Json);

        let back: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, json!({"id": 1}));
    }

    #[test]
    fn json_file_is_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "old contents that are much longer than the new ones").unwrap();

        write_output(&json!([]), &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn csv_from_list_of_objects() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let value = json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]);

        assert_eq!(write_output(&value, &path).unwrap(), OutputFormat::Csv);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, ["id,name", "1,a", "2,b"]);
    }

    #[test]
    fn csv_from_single_object_is_one_row() {
        let table = CsvTable::from_value(&json!({"id": 7, "title": "x", "done": false})).unwrap();
        assert_eq!(table.headers, ["id", "title", "done"]);
        assert_eq!(table.rows, vec![vec!["7", "x", "false"]]);
    }

    #[test]
    fn csv_header_follows_first_row_order() {
        let table = CsvTable::from_value(&json!([
            {"z": 1, "a": 2},
            {"a": 3, "z": 4}
        ]))
        .unwrap();
        assert_eq!(table.headers, ["z", "a"]);
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["4", "3"]]);
    }

    #[test]
    fn csv_missing_field_is_empty_cell() {
        let table = CsvTable::from_value(&json!([
            {"id": 1, "name": "a"},
            {"id": 2}
        ]))
        .unwrap();
        assert_eq!(table.rows[1], ["2", ""]);
    }

    #[test]
    fn csv_extra_field_is_rejected_before_writing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let value = json!([{"id": 1}, {"id": 2, "extra": true}]);

        let err = write_output(&value, &path).unwrap_err();

        assert!(matches!(err, ApiError::CsvShape(_)));
        assert!(!path.exists());
    }

    #[test]
    fn csv_cells_for_nested_and_null_values() {
        let table = CsvTable::from_value(&json!({
            "name": "Leanne, \"Bret\"",
            "address": {"city": "Gwenborough"},
            "tags": [1, 2],
            "phone": null
        }))
        .unwrap();
        assert_eq!(
            table.rows[0],
            ["Leanne, \"Bret\"", r#"{"city":"Gwenborough"}"#, "[1,2]", ""]
        );
    }

    #[test]
    fn csv_quotes_fields_with_commas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_output(&json!({"title": "a, b"}), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), ["title", "\"a, b\""]);
    }

    #[test]
    fn csv_empty_list_writes_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_output(&json!([]), &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn csv_rejects_scalars_and_non_object_rows() {
        assert!(matches!(
            CsvTable::from_value(&json!(42)).unwrap_err(),
            ApiError::CsvShape(_)
        ));
        assert!(matches!(
            CsvTable::from_value(&json!([{"id": 1}, 2])).unwrap_err(),
            ApiError::CsvShape(_)
        ));
    }

    #[test]
    fn unsupported_extension_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result.txt");

        let err = write_output(&json!({"id": 1}), &path).unwrap_err();

        assert!(matches!(err, ApiError::UnsupportedOutputFormat(_)));
        assert!(!path.exists());
    }
}
