//! # Target Resolution
//!
//! Classifies each path argument and expands directories into the YAML
//! files beneath them.
//!
//! Directory expansion uses the exact-case glob patterns `**/*.yaml` and
//! `**/*.yml`, in that order. Single-file arguments are not filtered here;
//! the case-insensitive extension gate in [`crate::validate_file`] decides
//! for them. So `dir/RULES.YAML` is skipped by expansion but accepted when
//! named directly.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Glob patterns applied beneath a directory argument, in order.
pub const DIRECTORY_PATTERNS: [&str; 2] = ["**/*.yaml", "**/*.yml"];

/// A classified path argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// An existing directory, to be expanded.
    Directory(PathBuf),
    /// An existing non-directory path, validated directly.
    File(PathBuf),
    /// Nothing exists at this path.
    Missing(PathBuf),
}

/// Error expanding a directory argument.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The directory path produced an invalid glob pattern.
    #[error("invalid glob pattern {pattern}: {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        source: glob::PatternError,
    },
}

/// Classify a path argument.
pub fn resolve_target(path: &Path) -> Target {
    if path.is_dir() {
        Target::Directory(path.to_path_buf())
    } else if path.exists() {
        Target::File(path.to_path_buf())
    } else {
        Target::Missing(path.to_path_buf())
    }
}

/// Expand `dir` into every regular file matching [`DIRECTORY_PATTERNS`].
///
/// All `.yaml` matches come first, then all `.yml` matches, each in the
/// glob engine's sorted order. Hidden entries are included. Entries that
/// cannot be read are logged and skipped.
pub fn expand_directory(dir: &Path) -> Result<Vec<PathBuf>, ResolveError> {
    let base = glob::Pattern::escape(&dir.to_string_lossy());
    let mut files = Vec::new();

    for suffix in DIRECTORY_PATTERNS {
        let pattern = Path::new(&base).join(suffix).to_string_lossy().into_owned();
        let entries = glob::glob(&pattern).map_err(|source| ResolveError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!(
                    path = %e.path().display(),
                    error = %e.error(),
                    "skipping unreadable entry during directory expansion"
                ),
            }
        }
    }

    tracing::debug!(dir = %dir.display(), count = files.len(), "expanded directory");
    Ok(files)
}
