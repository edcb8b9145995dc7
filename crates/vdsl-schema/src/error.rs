//! # Error Types — Per-File Failure Taxonomy
//!
//! Every check performed on a single document ends in either `Ok(())` or a
//! [`DocumentError`]. Each error maps to exactly one [`FailureKind`], which
//! the CLI uses to choose the verdict line format.
//!
//! Schema problems discovered at load time are captured as a
//! [`SchemaFault`] and converted into a [`DocumentError`] for every file
//! validated against that schema. A broken schema therefore fails each file
//! individually instead of aborting the run.

use std::fmt;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Category of a failed per-file verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The file extension is not `.yaml` or `.yml`.
    UnsupportedFormat,
    /// The document or the schema disappeared before it could be read.
    NotFound,
    /// The schema file is not well-formed JSON.
    InvalidSchemaJson,
    /// The document does not conform to the schema.
    ValidationFailed,
    /// Anything else: I/O, YAML syntax, forbidden tags, schema compilation.
    Unexpected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnsupportedFormat => "unsupported-format",
            Self::NotFound => "not-found",
            Self::InvalidSchemaJson => "invalid-schema-json",
            Self::ValidationFailed => "validation-failed",
            Self::Unexpected => "unexpected",
        };
        f.write_str(name)
    }
}

/// A single structural violation reported by the schema engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value in the document.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    /// Human-readable description of the mismatch.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Failure while decoding a YAML document in safe mode.
#[derive(Error, Debug)]
pub enum YamlError {
    /// The text is not well-formed YAML, or holds more than one document.
    #[error("{0}")]
    Syntax(#[from] serde_yaml::Error),

    /// Explicit tags would construct arbitrary types and are refused.
    #[error("could not determine a constructor for the tag '{0}'")]
    ForbiddenTag(String),

    /// Mapping keys must be scalars.
    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(String),

    /// `.nan` and `.inf` have no JSON representation.
    #[error("cannot represent float {0} in JSON")]
    NonFiniteFloat(f64),
}

/// Problem with the schema file, recorded once when the schema is loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaFault {
    /// The schema existed at startup but could not be found when read.
    #[error("{reason}: '{path}'")]
    NotFound {
        /// Schema path.
        path: String,
        /// I/O error text.
        reason: String,
    },

    /// The schema could not be read (permissions, directory, bad UTF-8).
    #[error("cannot read schema {path}: {reason}")]
    Unreadable {
        /// Schema path.
        path: String,
        /// I/O error text.
        reason: String,
    },

    /// The schema is not well-formed JSON.
    #[error("{0}")]
    InvalidJson(String),

    /// The schema is JSON but the engine refused to compile it.
    #[error("invalid schema: {0}")]
    Compile(String),
}

/// Failure of a single-document validation.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The extension gate rejected the file.
    #[error("Unsupported file format. Only YAML (.yaml, .yml) files are supported.")]
    UnsupportedFormat,

    /// The document or schema vanished before it could be read.
    #[error("File not found - {reason}: '{path}'")]
    NotFound {
        /// Path that could not be opened.
        path: String,
        /// I/O error text.
        reason: String,
    },

    /// The schema is not well-formed JSON.
    #[error("Invalid JSON: {0}")]
    InvalidSchemaJson(String),

    /// The document does not conform to the schema.
    #[error("Schema validation failed: {}", headline(.violations))]
    ValidationFailed {
        /// All violations in engine order; never empty.
        violations: Vec<Violation>,
    },

    /// The document is not safe, well-formed YAML.
    #[error("Unexpected error: {0}")]
    Yaml(#[from] YamlError),

    /// Any other failure.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

fn headline(violations: &[Violation]) -> &str {
    violations.first().map_or("", |v| v.message.as_str())
}

impl DocumentError {
    /// Returns the failure category of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::UnsupportedFormat => FailureKind::UnsupportedFormat,
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::InvalidSchemaJson(_) => FailureKind::InvalidSchemaJson,
            Self::ValidationFailed { .. } => FailureKind::ValidationFailed,
            Self::Yaml(_) | Self::Unexpected(_) => FailureKind::Unexpected,
        }
    }

    /// Message of the first violation, if this is a validation failure.
    pub fn headline(&self) -> Option<&str> {
        match self {
            Self::ValidationFailed { violations } => Some(headline(violations)),
            _ => None,
        }
    }

    /// Classify an I/O error raised while reading `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.display().to_string(),
                reason: err.to_string(),
            }
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

impl From<&SchemaFault> for DocumentError {
    fn from(fault: &SchemaFault) -> Self {
        match fault {
            SchemaFault::NotFound { path, reason } => Self::NotFound {
                path: path.clone(),
                reason: reason.clone(),
            },
            SchemaFault::InvalidJson(reason) => Self::InvalidSchemaJson(reason.clone()),
            SchemaFault::Unreadable { .. } | SchemaFault::Compile(_) => {
                Self::Unexpected(fault.to_string())
            }
        }
    }
}
