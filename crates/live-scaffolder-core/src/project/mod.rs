//! The project being created: its validated name and where it lives

pub mod interaction;
pub mod name;

use std::path::{Path, PathBuf};

pub use interaction::{acquire_project_name, NamePrompt};
pub use name::{validate_name, NameRejection, ProjectName, RESERVED_CHARS};

/// Subdirectory of the project that receives the template's source tree
pub const SOURCE_DIR: &str = "src";

/// Immutable description of the project for the rest of the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    name: ProjectName,
    target_dir: PathBuf,
}

impl ProjectSpec {
    /// The target directory is `base_dir/<name>`
    pub fn new(name: ProjectName, base_dir: &Path) -> Self {
        let target_dir = base_dir.join(name.as_str());
        Self { name, target_dir }
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn source_dir(&self) -> PathBuf {
        self.target_dir.join(SOURCE_DIR)
    }
}
