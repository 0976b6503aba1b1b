//! Reading form definitions and response maps from disk.
//!
//! Responses may be written either as tagged values
//! (`{"kind": "text", "value": "Alice"}`) or as plain JSON:
//!
//! | JSON                          | Value          |
//! |-------------------------------|----------------|
//! | string                        | `Text`         |
//! | number                        | `Number`       |
//! | bool                          | `Bool`         |
//! | array of strings              | `List`         |
//! | array of `{"name": ...}`      | `Files`        |

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::Path;

use formloom_core::{Error, FieldId, FileRef, FormDefinition, Responses, Result, Value};
use serde_json::Value as Json;

/// Load a form definition.
///
/// # Errors
///
/// `IoError` if the file cannot be read, `ParseError` if it is not a form.
pub fn read_form(path: &Path) -> Result<FormDefinition> {
    let json = read_json(path)?;
    serde_json::from_value(json)
        .map_err(|e| Error::parse_error(format!("{} is not a form definition: {e}", path.display())))
}

/// Load a response map.
///
/// # Errors
///
/// `IoError` if the file cannot be read, `ParseError` on malformed answers.
pub fn read_responses(path: &Path) -> Result<Responses> {
    responses_from_json(read_json(path)?)
}

fn read_json(path: &Path) -> Result<Json> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io_error(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::parse_error(format!("Failed to parse {}: {e}", path.display())))
}

/// Convert a JSON object into a response map. `null` entries are skipped.
///
/// # Errors
///
/// `ParseError` when the top level is not an object or an answer has no
/// value shape.
pub fn responses_from_json(json: Json) -> Result<Responses> {
    let Json::Object(entries) = json else {
        return Err(Error::parse_error("responses must be a JSON object"));
    };

    entries
        .into_iter()
        .filter(|(_, answer)| !answer.is_null())
        .map(|(id, answer)| {
            value_from_json(answer)
                .map(|value| (FieldId::new(id.clone()), value))
                .map_err(|e| Error::parse_error(format!("answer for '{id}': {e}")))
        })
        .collect()
}

fn value_from_json(json: Json) -> std::result::Result<Value, String> {
    match json {
        Json::String(s) => Ok(Value::Text(s)),
        Json::Bool(b) => Ok(Value::Bool(b)),
        Json::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| format!("number {n} out of range")),
        Json::Array(items) if items.iter().all(Json::is_string) => Ok(Value::List(
            items
                .into_iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        )),
        Json::Array(items) => serde_json::from_value::<Vec<FileRef>>(Json::Array(items))
            .map(Value::Files)
            .map_err(|e| format!("expected a list of strings or files: {e}")),
        object @ Json::Object(_) => {
            serde_json::from_value::<Value>(object).map_err(|e| e.to_string())
        }
        Json::Null => Err("null is not an answer".to_string()),
    }
}
