//! Template loading from the embedded tree or a local directory
//!
//! The embedded template is compiled into the binary from `templates/live`.
//! A local directory with the same layout can replace it during template
//! development by pointing the product's template env var at it.

use super::manifest::{TemplateManifest, MANIFEST_FILE};
use super::render::RenderedFile;
use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use include_dir::{include_dir, Dir, DirEntry};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

static EMBEDDED_TEMPLATE: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates/live");

/// Where template files come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    Local(PathBuf),
}

/// Directory tree copied verbatim into the project's source subdirectory
#[derive(Debug, Clone)]
pub enum SourceTree {
    Embedded(&'static Dir<'static>),
    Local(PathBuf),
}

/// A template with its static files read and its source tree located
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    pub manifest: TemplateManifest,
    pub root_files: Vec<RenderedFile>,
    pub source_tree: SourceTree,
}

impl LoadedTemplate {
    /// One-line "name - description" label taken from the manifest
    pub fn summary(&self) -> String {
        format!("{} - {}", self.manifest.name, self.manifest.description)
    }
}

impl TemplateSource {
    /// Use the directory named by the product's template env var, if set
    pub fn from_config<C: ProductConfig>(config: &C) -> Self {
        Self::from_override(std::env::var_os(config.template_dir_env()).map(PathBuf::from))
    }

    /// Local source for a non-empty override, embedded otherwise
    pub fn from_override(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if !path.as_os_str().is_empty() => Self::Local(path),
            _ => Self::Embedded,
        }
    }

    /// Read the manifest and root files and locate the source tree
    pub async fn load(&self) -> Result<LoadedTemplate, ScaffoldError> {
        match self {
            TemplateSource::Embedded => load_embedded(&EMBEDDED_TEMPLATE),
            TemplateSource::Local(root) => load_local(root).await,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Embedded => "built-in template".to_string(),
            TemplateSource::Local(path) => format!("local template at {}", path.display()),
        }
    }
}

fn load_embedded(root: &'static Dir<'static>) -> Result<LoadedTemplate, ScaffoldError> {
    let manifest = root
        .get_file(MANIFEST_FILE)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| ScaffoldError::Template(format!("missing {}", MANIFEST_FILE)))?;
    let manifest = TemplateManifest::parse(manifest)?;

    let mut root_files = Vec::with_capacity(manifest.root_files.len());
    for path in &manifest.root_files {
        let file = root
            .get_file(path)
            .ok_or_else(|| ScaffoldError::Template(format!("missing root file {}", path)))?;
        root_files.push(RenderedFile::new(path, file.contents()));
    }

    let source_dir = root.get_dir(&manifest.source_dir).ok_or_else(|| {
        ScaffoldError::Template(format!("missing source directory {}", manifest.source_dir))
    })?;

    Ok(LoadedTemplate {
        manifest,
        root_files,
        source_tree: SourceTree::Embedded(source_dir),
    })
}

async fn load_local(root: &Path) -> Result<LoadedTemplate, ScaffoldError> {
    let manifest_path = root.join(MANIFEST_FILE);
    let manifest = fs::read_to_string(&manifest_path)
        .await
        .map_err(ScaffoldError::io("read", &manifest_path))?;
    let manifest = TemplateManifest::parse(&manifest)?;

    let mut root_files = Vec::with_capacity(manifest.root_files.len());
    for path in &manifest.root_files {
        let file_path = root.join(path);
        let content = fs::read(&file_path)
            .await
            .map_err(ScaffoldError::io("read", &file_path))?;
        root_files.push(RenderedFile::new(path, content));
    }

    let source_dir = root.join(&manifest.source_dir);
    if !source_dir.is_dir() {
        return Err(ScaffoldError::Template(format!(
            "missing source directory {}",
            source_dir.display()
        )));
    }

    Ok(LoadedTemplate {
        manifest,
        root_files,
        source_tree: SourceTree::Local(source_dir),
    })
}

impl SourceTree {
    /// Recursively copy the tree into `dest`, returning the number of files written
    ///
    /// `dest` and any nested directories are created as needed; existing
    /// directories are reused.
    pub async fn copy_into(&self, dest: &Path) -> Result<usize, ScaffoldError> {
        match self {
            SourceTree::Embedded(dir) => copy_embedded(dir, dest).await,
            SourceTree::Local(root) => copy_local(root, dest).await,
        }
    }
}

async fn copy_embedded(root: &Dir<'_>, dest: &Path) -> Result<usize, ScaffoldError> {
    fs::create_dir_all(dest)
        .await
        .map_err(ScaffoldError::io("create directory", dest))?;

    let mut copied = 0;
    let mut pending = vec![root];

    while let Some(dir) = pending.pop() {
        for entry in dir.entries() {
            match entry {
                DirEntry::Dir(sub) => {
                    let target = dest.join(relative_to(sub.path(), root.path()));
                    fs::create_dir_all(&target)
                        .await
                        .map_err(ScaffoldError::io("create directory", &target))?;
                    pending.push(sub);
                }
                DirEntry::File(file) => {
                    let target = dest.join(relative_to(file.path(), root.path()));
                    fs::write(&target, file.contents())
                        .await
                        .map_err(ScaffoldError::io("write", &target))?;
                    copied += 1;
                }
            }
        }
    }

    Ok(copied)
}

async fn copy_local(root: &Path, dest: &Path) -> Result<usize, ScaffoldError> {
    fs::create_dir_all(dest)
        .await
        .map_err(ScaffoldError::io("create directory", dest))?;

    let mut copied = 0;

    // WalkDir yields parents before children, so directories exist before their files.
    // Links are followed so a symlinked directory is copied as a directory.
    for entry in WalkDir::new(root).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| ScaffoldError::Io {
            action: "read template entry",
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e.into(),
        })?;
        let target = dest.join(relative_to(entry.path(), root));

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .await
                .map_err(ScaffoldError::io("create directory", &target))?;
        } else {
            fs::copy(entry.path(), &target)
                .await
                .map_err(ScaffoldError::io("copy", &target))?;
            copied += 1;
        }
    }

    Ok(copied)
}

fn relative_to<'a>(path: &'a Path, base: &Path) -> &'a Path {
    path.strip_prefix(base).unwrap_or(path)
}
