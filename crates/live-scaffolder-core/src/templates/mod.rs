//! Template loading and rendering
//!
//! This module provides:
//! - The template manifest type (TemplateManifest)
//! - Template loading from the embedded tree or a local directory
//! - Rendering of the generated project files (package.json, .env, ...)

pub mod manifest;
pub mod render;
pub mod source;

pub use manifest::{TemplateManifest, MANIFEST_FILE};
pub use render::{
    compatibility_date, generate_secret, render_dot_env, render_gitignore, render_package_json,
    render_project_files, render_wrangler_jsonc, today_utc, RenderedFile,
};
pub use source::{LoadedTemplate, SourceTree, TemplateSource};
