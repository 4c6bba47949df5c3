//! Project name validation

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Characters that cannot appear in a folder name (path separators and glob specials)
pub const RESERVED_CHARS: &[char] = &['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Why a candidate project name was turned down
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameRejection {
    #[error("Project name cannot be empty")]
    Empty,

    #[error("Project name contains invalid folder characters")]
    InvalidCharacters,

    #[error("A folder named \"{0}\" already exists. Please choose a different name.")]
    AlreadyExists(String),
}

/// A project name that passed validation
///
/// Only [`validate_name`] constructs this, so holding one means the name is
/// non-empty, trimmed, and free of [`RESERVED_CHARS`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for ProjectName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// Validate a candidate project name
///
/// Rules are applied in order and the first failure wins:
/// 1. empty after trimming
/// 2. contains a reserved character
/// 3. `exists` reports something already at that (relative) path
///
/// The accepted name is the trimmed input with no further normalization.
pub fn validate_name<F>(candidate: &str, exists: F) -> Result<ProjectName, NameRejection>
where
    F: FnOnce(&Path) -> bool,
{
    let name = candidate.trim();

    if name.is_empty() {
        return Err(NameRejection::Empty);
    }

    if name.contains(RESERVED_CHARS) {
        return Err(NameRejection::InvalidCharacters);
    }

    if exists(Path::new(name)) {
        return Err(NameRejection::AlreadyExists(name.to_string()));
    }

    Ok(ProjectName(name.to_string()))
}
