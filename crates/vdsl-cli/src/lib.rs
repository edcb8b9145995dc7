//! # vdsl-cli — `validate-dsl` Command-Line Interface
//!
//! Validates YAML DSL files against a JSON Schema:
//!
//! ```bash
//! validate-dsl dsl/samples
//! validate-dsl --schema other/schema.json rules.yaml more/
//! ```
//!
//! Each file gets one verdict line. Successes go to stdout, failures to
//! stderr. The exit code is 0 only if every file passed and every path
//! existed.
//!
//! ## Crate Policy
//!
//! - Argument parsing and line rendering live here; validation lives in
//!   `vdsl-schema`.
//! - Verdict line formats are stable; scripts grep for them.

pub mod report;
pub mod validate;

/// Schema path used when `--schema` is not given.
pub const DEFAULT_SCHEMA_PATH: &str = "dsl/schema.json";
