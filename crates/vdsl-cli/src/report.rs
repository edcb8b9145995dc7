//! # Verdict Lines
//!
//! Renders per-file verdicts. Success lines go to the output sink, every
//! failure line to the error sink. Sinks are generic so tests can capture
//! both streams.

use std::io::{self, Stderr, Stdout, Write};
use std::path::Path;

use vdsl_schema::DocumentError;

const PASS: &str = "✅";
const FAIL: &str = "❌";

/// Writes verdict lines to an output and an error sink.
#[derive(Debug)]
pub struct Reporter<O, E> {
    out: O,
    err: E,
}

impl Reporter<Stdout, Stderr> {
    /// Reporter bound to the process's stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    /// Reporter over arbitrary sinks.
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// `✅ <file> - Valid`
    pub fn valid(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "{PASS} {} - Valid", path.display())
    }

    /// One or two failure lines, depending on the failure category.
    pub fn failed(&mut self, path: &Path, error: &DocumentError) -> io::Result<()> {
        match error {
            DocumentError::NotFound { .. } => writeln!(self.err, "{FAIL} Error: {error}"),
            DocumentError::ValidationFailed { .. } => {
                writeln!(self.err, "{FAIL} {} - Schema validation failed:", path.display())?;
                writeln!(self.err, "   {}", error.headline().unwrap_or_default())
            }
            _ => writeln!(self.err, "{FAIL} {} - {error}", path.display()),
        }
    }

    /// A path argument that does not exist.
    pub fn missing_target(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.err, "{FAIL} Error: File not found: {}", path.display())
    }

    /// The schema file does not exist; the run is over.
    pub fn missing_schema(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.err, "{FAIL} Error: Schema file not found: {}", path.display())
    }

    /// Flush both sinks.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }

    /// Consume the reporter, returning the sinks.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}
