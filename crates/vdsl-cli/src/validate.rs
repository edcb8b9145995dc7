//! # Validation Run
//!
//! Coordinates one run: check the schema exists, load it once, walk the
//! path arguments in order, validate every resolved file, and fold the
//! verdicts into an exit code.
//!
//! A missing schema is the only fatal condition. Every other problem is
//! reported for its own file or path, and the run continues.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use vdsl_schema::{
    expand_directory, resolve_target, schema_exists, validate_file, DocumentError, SchemaSource,
    Target,
};

use crate::report::Reporter;
use crate::DEFAULT_SCHEMA_PATH;

/// Arguments for a validation run.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the JSON schema file.
    #[arg(long, value_name = "SCHEMA", default_value = DEFAULT_SCHEMA_PATH)]
    pub schema: PathBuf,

    /// One or more DSL YAML files or directories to validate.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Tally of a validation run.
///
/// The run succeeds only while nothing has failed and no path was missing;
/// counters only grow, so the outcome does not depend on file order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Files handed to the validator.
    pub checked: usize,
    /// Files that passed.
    pub passed: usize,
    /// Files that failed any check.
    pub failed: usize,
    /// Path arguments that did not exist.
    pub missing: usize,
}

impl RunReport {
    /// Record one file verdict.
    pub fn record(&mut self, passed: bool) {
        self.checked += 1;
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Record a path argument that did not exist.
    pub fn record_missing(&mut self) {
        self.missing += 1;
    }

    /// True if every file passed and every path existed.
    pub fn success(&self) -> bool {
        self.failed == 0 && self.missing == 0
    }

    /// Process exit code for this run.
    pub fn exit_code(&self) -> u8 {
        if self.success() {
            0
        } else {
            1
        }
    }
}

/// Execute a validation run.
///
/// Returns the exit code: 0 if everything passed, 1 if the schema is
/// missing or any file failed or any path was missing. An `Err` means a
/// verdict line could not be written.
pub fn run_validate<O: Write, E: Write>(
    args: &ValidateArgs,
    reporter: &mut Reporter<O, E>,
) -> Result<u8> {
    if !schema_exists(&args.schema) {
        reporter
            .missing_schema(&args.schema)
            .context("failed to write verdict")?;
        reporter.flush().context("failed to flush output")?;
        return Ok(1);
    }

    let schema = SchemaSource::load(&args.schema);
    let mut report = RunReport::default();

    for path in &args.paths {
        match resolve_target(path) {
            Target::Directory(dir) => match expand_directory(&dir) {
                Ok(files) => {
                    for file in &files {
                        check_file(&schema, file, reporter, &mut report)?;
                    }
                }
                Err(e) => {
                    let error = DocumentError::Unexpected(e.to_string());
                    reporter
                        .failed(&dir, &error)
                        .context("failed to write verdict")?;
                    report.record(false);
                }
            },
            Target::File(file) => check_file(&schema, &file, reporter, &mut report)?,
            Target::Missing(missing) => {
                reporter
                    .missing_target(&missing)
                    .context("failed to write verdict")?;
                report.record_missing();
            }
        }
    }

    reporter.flush().context("failed to flush output")?;

    tracing::info!(
        checked = report.checked,
        passed = report.passed,
        failed = report.failed,
        missing = report.missing,
        "validation run complete"
    );

    Ok(report.exit_code())
}

fn check_file<O: Write, E: Write>(
    schema: &SchemaSource,
    file: &Path,
    reporter: &mut Reporter<O, E>,
    report: &mut RunReport,
) -> Result<()> {
    let verdict = validate_file(file, schema);
    let written = match &verdict {
        Ok(()) => reporter.valid(file),
        Err(e) => {
            tracing::debug!(path = %file.display(), kind = %e.kind(), "document failed");
            reporter.failed(file, e)
        }
    };
    written.context("failed to write verdict")?;
    report.record(verdict.is_ok());
    Ok(())
}
