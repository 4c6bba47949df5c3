//! Typed errors for runtime checks, template loading, and materialization

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that end a scaffolding run
///
/// Name rejections are not part of this type: they are always recovered by
/// re-prompting (see [`crate::project::NameRejection`]).
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Node.js could not be executed at all
    #[error("Node.js {required}+ is required but was not found (install from https://nodejs.org)")]
    RuntimeMissing { required: u64 },

    /// Node.js is installed but older than the supported minimum
    #[error("Node.js {required}+ is required. You're using {found}")]
    RuntimeTooOld { required: u64, found: String },

    /// `node --version` printed something that is not a version
    #[error("Could not parse Node.js version '{0}'")]
    UnparsableVersion(String),

    /// The target directory appeared (and was populated) after the name was accepted
    #[error("Target directory is not empty: {}", .0.display())]
    TargetNotEmpty(PathBuf),

    /// A single filesystem operation failed
    #[error("Failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One or more concurrent writes failed; the others were left in place
    #[error("{} of {total} write operations failed:\n{}", .failures.len(), describe_failures(.failures))]
    PartialWrite {
        total: usize,
        failures: Vec<ScaffoldError>,
    },

    /// The template manifest could not be parsed
    #[error("Failed to parse template manifest")]
    Manifest(#[from] serde_yaml::Error),

    /// The template tree does not match its manifest
    #[error("Invalid template: {0}")]
    Template(String),

    /// A generated file could not be serialized
    #[error("Failed to render {file}")]
    Render {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ScaffoldError {
    /// Build a `map_err` adapter that tags an I/O error with what was being done and where
    pub fn io(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| ScaffoldError::Io {
            action,
            path,
            source,
        }
    }

    /// Whether this error is a failed runtime precondition (as opposed to a failed run)
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ScaffoldError::RuntimeMissing { .. }
                | ScaffoldError::RuntimeTooOld { .. }
                | ScaffoldError::UnparsableVersion(_)
        )
    }
}

fn describe_failures(failures: &[ScaffoldError]) -> String {
    failures
        .iter()
        .map(|failure| match failure {
            ScaffoldError::Io { source, .. } => format!("  - {}: {}", failure, source),
            other => format!("  - {}", other),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
