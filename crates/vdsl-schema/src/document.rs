//! # Document Loading
//!
//! Reads DSL documents from disk and decodes them in safe mode: only plain
//! mappings, sequences, and scalars survive. Explicit tags are rejected
//! rather than stripped, so a document can never smuggle a typed value past
//! the schema.

use std::path::Path;

use serde_json::Value;

use crate::error::{DocumentError, YamlError};

/// File extensions accepted by the extension gate, compared case-insensitively.
pub const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Returns true if `path` ends in `.yaml` or `.yml`, ignoring ASCII case.
pub fn has_yaml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| YAML_EXTENSIONS.iter().any(|y| ext.eq_ignore_ascii_case(y)))
}

/// Read and safely decode the YAML document at `path`.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| DocumentError::from_io(path, e))?;
    Ok(parse_document(&content)?)
}

/// Safely decode YAML text into a JSON value tree.
///
/// An empty document decodes to `null`. Streams holding more than one
/// document are rejected by the parser.
pub fn parse_document(content: &str) -> Result<Value, YamlError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    yaml_to_json_value(&yaml)
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Scalar mapping keys are stringified the way JSON requires. Tagged values
/// are refused.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, YamlError> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(u.into()))
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or(YamlError::NonFiniteFloat(f))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                object.insert(mapping_key(k)?, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => Err(YamlError::ForbiddenTag(tagged.tag.to_string())),
    }
}

fn mapping_key(key: &serde_yaml::Value) -> Result<String, YamlError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => Err(YamlError::ForbiddenTag(tagged.tag.to_string())),
        other => Err(YamlError::UnsupportedKey(format!("{other:?}"))),
    }
}
