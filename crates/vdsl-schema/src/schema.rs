//! # Schema Loading
//!
//! Loads the JSON Schema once per run and compiles it with the `jsonschema`
//! engine. The draft is taken from the schema's `$schema` keyword, falling
//! back to the engine's latest draft.
//!
//! ## Schema Resolution
//!
//! `$ref`s are never fetched over the network. A local retriever serves
//! every other `*.json` file in the schema's directory, indexed by its
//! `$id` and by its filename, so a relative reference such as
//! `{"$ref": "common.json#/$defs/rate"}` resolves against a sibling file.
//!
//! `format` is treated as an annotation under every draft; only structure
//! is checked.
//!
//! ## Faults
//!
//! A schema that cannot be read, decoded, or compiled does not abort the
//! run. The fault is recorded in [`SchemaSource`] and surfaces as a failed
//! verdict for each document checked against it.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;

use crate::error::SchemaFault;

/// Serves `$ref` targets from schemas loaded off the local disk.
struct LocalSchemaRetriever {
    /// Map from `$id` URI or bare filename to schema value.
    schemas_by_uri: HashMap<String, Value>,
}

impl LocalSchemaRetriever {
    /// Index every `*.json` file directly inside `dir`.
    ///
    /// Files that cannot be read or decoded are skipped; a `$ref` pointing
    /// at one of them fails compilation with the engine's own message.
    fn from_dir(dir: &Path) -> Self {
        let mut schemas_by_uri = HashMap::new();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "no sibling schemas indexed");
                return Self { schemas_by_uri };
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let value = match read_schema(&path) {
                Ok(value) => value,
                Err(fault) => {
                    tracing::debug!(path = %path.display(), %fault, "skipping sibling schema");
                    continue;
                }
            };
            if let Some(id) = value.get("$id").and_then(|v| v.as_str()) {
                schemas_by_uri.insert(id.to_string(), value.clone());
            }
            schemas_by_uri.insert(filename.to_string(), value);
        }

        Self { schemas_by_uri }
    }
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        self.schemas_by_uri
            .get(filename)
            .cloned()
            .ok_or_else(|| format!("schema not found for URI: {uri_str}").into())
    }
}

/// Returns true if the schema path exists on disk.
///
/// This is the only schema check that aborts a run.
pub fn schema_exists(path: &Path) -> bool {
    path.exists()
}

/// Read and decode a JSON schema file.
///
/// # Errors
///
/// [`SchemaFault::NotFound`] if the file is gone, [`SchemaFault::Unreadable`]
/// for any other I/O failure, [`SchemaFault::InvalidJson`] if the content
/// is not well-formed JSON.
pub fn read_schema(path: &Path) -> Result<Value, SchemaFault> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        let path = path.display().to_string();
        if e.kind() == io::ErrorKind::NotFound {
            SchemaFault::NotFound {
                path,
                reason: e.to_string(),
            }
        } else {
            SchemaFault::Unreadable {
                path,
                reason: e.to_string(),
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|e| SchemaFault::InvalidJson(e.to_string()))
}

/// The schema for one validation run: a compiled validator or the fault
/// that prevented compiling it.
pub struct SchemaSource {
    path: PathBuf,
    compiled: Result<Validator, SchemaFault>,
}

impl fmt::Debug for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaSource")
            .field("path", &self.path)
            .field("fault", &self.fault())
            .finish()
    }
}

impl SchemaSource {
    /// Load and compile the schema at `path`.
    ///
    /// Never fails: a fault is stored and reported per document by
    /// [`crate::validate_file`].
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let compiled = read_schema(&path).and_then(|schema| Self::compile(&path, &schema));

        match &compiled {
            Ok(_) => tracing::info!(schema = %path.display(), "loaded schema"),
            Err(fault) => tracing::info!(
                schema = %path.display(),
                %fault,
                "schema unusable; every document will fail"
            ),
        }

        Self { path, compiled }
    }

    /// Compile an already-decoded schema. `path` locates sibling schemas
    /// for `$ref` resolution.
    pub fn from_value(path: impl Into<PathBuf>, schema: &Value) -> Self {
        let path = path.into();
        let compiled = Self::compile(&path, schema);
        Self { path, compiled }
    }

    fn compile(path: &Path, schema: &Value) -> Result<Validator, SchemaFault> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let retriever = LocalSchemaRetriever::from_dir(dir);

        jsonschema::options()
            .with_retriever(retriever)
            .should_validate_formats(false)
            .build(schema)
            .map_err(|e| SchemaFault::Compile(e.to_string()))
    }

    /// Path the schema was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The load-time fault, if the schema is unusable.
    pub fn fault(&self) -> Option<&SchemaFault> {
        self.compiled.as_ref().err()
    }

    /// The compiled validator, or the load-time fault.
    pub fn validator(&self) -> Result<&Validator, &SchemaFault> {
        self.compiled.as_ref()
    }
}
