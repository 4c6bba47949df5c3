//! Template manifest types and parsing

use crate::error::ScaffoldError;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// File name of the manifest at the root of a template directory
pub const MANIFEST_FILE: &str = "template.yaml";

fn default_source_dir() -> String {
    "src".to_string()
}

/// Template manifest (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Files copied verbatim into the project root
    #[serde(default)]
    pub root_files: Vec<String>,

    /// Directory copied recursively into the project's source subdirectory
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
}

impl TemplateManifest {
    /// Parse and validate a manifest
    pub fn parse(content: &str) -> Result<Self, ScaffoldError> {
        let manifest: TemplateManifest = serde_yaml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Every listed path must stay inside the template directory
    fn validate(&self) -> Result<(), ScaffoldError> {
        for path in self.root_files.iter().chain(std::iter::once(&self.source_dir)) {
            if !is_contained(path) {
                return Err(ScaffoldError::Template(format!(
                    "path '{}' must be relative and stay inside the template",
                    path
                )));
            }
        }
        Ok(())
    }
}

fn is_contained(path: &str) -> bool {
    !path.is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let manifest = TemplateManifest::parse(
            r#"
name: Live
description: Live server
root_files:
  - ace.config.js
  - tsconfig.json
source_dir: src
"#,
        )
        .unwrap();

        assert_eq!(manifest.name, "Live");
        assert_eq!(manifest.root_files, vec!["ace.config.js", "tsconfig.json"]);
        assert_eq!(manifest.source_dir, "src");
    }

    #[test]
    fn test_source_dir_defaults_to_src() {
        let manifest = TemplateManifest::parse("name: a\ndescription: b\n").unwrap();
        assert!(manifest.root_files.is_empty());
        assert_eq!(manifest.source_dir, "src");
    }

    #[test]
    fn test_escaping_paths_rejected() {
        for bad in ["../outside.js", "/etc/passwd", ""] {
            let yaml = format!("name: a\ndescription: b\nroot_files: [\"{}\"]\n", bad);
            assert!(
                matches!(TemplateManifest::parse(&yaml), Err(ScaffoldError::Template(_))),
                "path {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_malformed_yaml_is_a_manifest_error() {
        assert!(matches!(
            TemplateManifest::parse("name: [unterminated"),
            Err(ScaffoldError::Manifest(_))
        ));
    }
}
