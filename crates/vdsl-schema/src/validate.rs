//! # Document Validation
//!
//! Validates one DSL document against one loaded schema. Every failure is
//! returned as a [`DocumentError`]; nothing panics or escapes the per-file
//! boundary.
//!
//! Checks run in a fixed order:
//!
//! 1. A schema fault recorded at load time wins.
//! 2. The extension gate (`.yaml`/`.yml`, any case).
//! 3. Safe YAML decoding.
//! 4. Structural validation, collecting every violation.

use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;

use crate::document::{has_yaml_extension, load_document};
use crate::error::{DocumentError, Violation};
use crate::schema::SchemaSource;

/// Validate the document at `path` against `schema`.
pub fn validate_file(path: &Path, schema: &SchemaSource) -> Result<(), DocumentError> {
    tracing::debug!(path = %path.display(), "validating document");

    let validator = schema.validator().map_err(DocumentError::from)?;

    if !has_yaml_extension(path) {
        return Err(DocumentError::UnsupportedFormat);
    }

    let document = load_document(path)?;
    validate_value(validator, &document)
}

/// Validate an already-decoded document.
///
/// # Errors
///
/// [`DocumentError::ValidationFailed`] carrying every violation. The
/// shallowest violation comes first and becomes the headline; ties keep
/// the order the engine reports them in.
pub fn validate_value(validator: &Validator, document: &Value) -> Result<(), DocumentError> {
    let mut violations: Vec<Violation> = validator
        .iter_errors(document)
        .map(|e| Violation {
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if violations.is_empty() {
        return Ok(());
    }
    violations.sort_by_key(|v| depth(&v.instance_path));

    for extra in violations.iter().skip(1) {
        tracing::debug!(
            instance_path = %extra.instance_path,
            schema_path = %extra.schema_path,
            "additional violation: {}",
            extra.message
        );
    }

    Err(DocumentError::ValidationFailed { violations })
}

/// Number of segments in a JSON pointer; the root is 0.
fn depth(pointer: &str) -> usize {
    pointer.matches('/').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use serde_json::json;
    use std::path::PathBuf;

    fn name_schema() -> SchemaSource {
        SchemaSource::from_value(
            "schema.json",
            &json!({
                "type": "object",
                "required": ["name"],
                "properties": {"name": {"type": "string"}}
            }),
        )
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn conforming_document_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "alice.yaml", "name: Alice\n");
        validate_file(&path, &name_schema()).unwrap();
    }

    #[test]
    fn missing_required_property_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "age.yaml", "age: 30\n");
        let err = validate_file(&path, &name_schema()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ValidationFailed);
        let headline = err.headline().unwrap();
        assert!(headline.contains("name"), "headline: {headline}");
        assert!(headline.contains("required"), "headline: {headline}");
    }

    #[test]
    fn wrong_type_fails_with_instance_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "typed.yml", "name: 42\n");
        match validate_file(&path, &name_schema()).unwrap_err() {
            DocumentError::ValidationFailed { violations } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].instance_path, "/name");
                assert!(violations[0].message.contains("string"));
            }
            other => panic!("expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn all_violations_are_collected() {
        let schema = SchemaSource::from_value(
            "schema.json",
            &json!({
                "type": "object",
                "required": ["name", "tax_year"],
                "properties": {
                    "mode": {"enum": ["annual", "monthly"]},
                    "code": {"type": "string", "pattern": "^[A-Z]{2}$"}
                }
            }),
        );
        let err = validate_value(
            schema.validator().unwrap(),
            &json!({"mode": "weekly", "code": "usa"}),
        )
        .unwrap_err();
        match err {
            DocumentError::ValidationFailed { violations } => {
                assert!(violations.len() >= 3, "violations: {violations:?}");
                assert!(violations.iter().any(|v| v.message.contains("weekly")));
                assert!(violations.iter().any(|v| v.instance_path == "/code"));
            }
            other => panic!("expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn unsupported_extension_fails_regardless_of_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "alice.json", "name: Alice\n");
        let err = validate_file(&path, &name_schema()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::UnsupportedFormat);
    }

    #[test]
    fn uppercase_extension_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "ALICE.YML", "name: Alice\n");
        validate_file(&path, &name_schema()).unwrap();
    }

    #[test]
    fn schema_fault_takes_precedence_over_extension_gate() {
        let dir = tempfile::tempdir().unwrap();
        let schema_path = write(dir.path(), "schema.json", "[1, 2");
        let schema = SchemaSource::load(&schema_path);
        let doc = write(dir.path(), "notes.txt", "anything");

        let err = validate_file(&doc, &schema).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidSchemaJson);
        assert!(err.to_string().starts_with("Invalid JSON: "));
    }

    #[test]
    fn malformed_yaml_is_unexpected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "broken.yaml", "name: [Alice\n");
        let err = validate_file(&path, &name_schema()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Unexpected);
    }

    #[test]
    fn tagged_yaml_is_unexpected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "tagged.yaml", "name: !secret Alice\n");
        let err = validate_file(&path, &name_schema()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Unexpected);
        assert!(err.to_string().contains("constructor for the tag"));
    }

    #[test]
    fn vanished_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_file(&dir.path().join("gone.yaml"), &name_schema()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);
    }

    #[test]
    fn validation_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "age.yaml", "age: 30\n");
        let schema = name_schema();
        let first = validate_file(&path, &schema).unwrap_err().to_string();
        let second = validate_file(&path, &schema).unwrap_err().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn shallowest_violation_is_the_headline() {
        let schema = SchemaSource::from_value(
            "schema.json",
            &json!({
                "type": "object",
                "required": ["name"],
                "properties": {
                    "brackets": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {"rate": {"type": "number"}}
                        }
                    }
                }
            }),
        );
        let err = validate_value(
            schema.validator().unwrap(),
            &json!({"brackets": [{"rate": "high"}]}),
        )
        .unwrap_err();
        match &err {
            DocumentError::ValidationFailed { violations } => {
                assert_eq!(violations.len(), 2, "violations: {violations:?}");
                assert_eq!(violations[0].instance_path, "");
                assert_eq!(violations[1].instance_path, "/brackets/0/rate");
            }
            other => panic!("expected ValidationFailed, got: {other}"),
        }
        assert!(err.headline().unwrap().contains("name"));
    }

    #[test]
    fn empty_document_fails_type_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "empty.yaml", "");
        let err = validate_file(&path, &name_schema()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ValidationFailed);
        assert!(err.headline().unwrap().contains("null"), "got: {err}");
    }
}
