//! # vdsl-schema — DSL Document Validation
//!
//! Checks YAML DSL documents against a JSON Schema and classifies every
//! failure. The CLI in `vdsl-cli` is a thin shell over this crate.
//!
//! ## Modules
//!
//! - [`schema`] — loads and compiles the schema once per run, with offline
//!   `$ref` resolution against sibling files. Load problems become a
//!   [`SchemaFault`] instead of an error.
//! - [`document`] — safe YAML decoding into `serde_json::Value`.
//! - [`validate`] — the per-file check, [`validate_file`].
//! - [`resolve`] — classifies path arguments and expands directories.
//! - [`error`] — the [`DocumentError`] / [`FailureKind`] taxonomy.
//!
//! ## Crate Policy
//!
//! - No panics on user input. Every per-file problem is a `DocumentError`.
//! - The schema engine never touches the network.

pub mod document;
pub mod error;
pub mod resolve;
pub mod schema;
pub mod validate;

pub use document::{has_yaml_extension, load_document, parse_document, YAML_EXTENSIONS};
pub use error::{DocumentError, FailureKind, SchemaFault, Violation, YamlError};
pub use resolve::{expand_directory, resolve_target, ResolveError, Target, DIRECTORY_PATTERNS};
pub use schema::{read_schema, schema_exists, SchemaSource};
pub use validate::{validate_file, validate_value};
