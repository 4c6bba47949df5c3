//! Writing a project to disk
//!
//! All file writes and the source-tree copy target disjoint paths, so they
//! are issued together and awaited jointly. A failed write does not stop or
//! undo its siblings; nothing is rolled back.

use crate::error::ScaffoldError;
use crate::project::ProjectSpec;
use crate::templates::{render_project_files, LoadedTemplate, RenderedFile, SourceTree};
use chrono::NaiveDate;
use futures::future::join_all;
use rand::{CryptoRng, RngCore};
use std::path::Path;
use tokio::fs;

/// Everything that will be written into a project directory
#[derive(Debug, Clone)]
pub struct MaterializePlan {
    /// Files written relative to the project root
    pub files: Vec<RenderedFile>,
    /// Tree copied into the project's source subdirectory
    pub source_tree: Option<SourceTree>,
}

/// What a successful materialization wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeReport {
    pub files_written: usize,
}

impl MaterializePlan {
    pub fn new(files: Vec<RenderedFile>, source_tree: Option<SourceTree>) -> Self {
        Self { files, source_tree }
    }

    /// Combine a loaded template with the generated files for `spec`
    pub fn for_project<R: RngCore + CryptoRng>(
        spec: &ProjectSpec,
        template: LoadedTemplate,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Self, ScaffoldError> {
        let generated = render_project_files(spec.name(), today, rng)?;
        let mut files = template.root_files;

        if let Some(clash) = files
            .iter()
            .find(|f| generated.iter().any(|g| g.relative_path == f.relative_path))
        {
            return Err(ScaffoldError::Template(format!(
                "root file {} would overwrite a generated file",
                clash.relative_path.display()
            )));
        }

        files.extend(generated);
        Ok(Self::new(files, Some(template.source_tree)))
    }

    /// Number of concurrent operations this plan schedules
    pub fn operation_count(&self) -> usize {
        self.files.len() + usize::from(self.source_tree.is_some())
    }
}

/// Create the project directory and write every planned file into it
///
/// The target may already exist only if it is empty. Once the directories
/// are in place, every write is attempted; if any fail, the error lists
/// all of them and the successful writes stay on disk.
pub async fn materialize(
    spec: &ProjectSpec,
    plan: &MaterializePlan,
) -> Result<MaterializeReport, ScaffoldError> {
    let target = spec.target_dir();
    prepare_target(target).await?;

    let source_dir = spec.source_dir();
    fs::create_dir(&source_dir)
        .await
        .map_err(ScaffoldError::io("create directory", &source_dir))?;

    let writes = join_all(plan.files.iter().map(|file| write_file(target, file)));
    let copy = async {
        match &plan.source_tree {
            Some(tree) => tree.copy_into(&source_dir).await,
            None => Ok(0),
        }
    };
    let (write_results, copy_result) = futures::join!(writes, copy);

    let mut files_written = 0;
    let mut failures = Vec::new();
    for result in write_results.into_iter().chain(std::iter::once(copy_result)) {
        match result {
            Ok(count) => files_written += count,
            Err(e) => failures.push(e),
        }
    }

    if !failures.is_empty() {
        return Err(ScaffoldError::PartialWrite {
            total: plan.operation_count(),
            failures,
        });
    }

    Ok(MaterializeReport { files_written })
}

async fn prepare_target(dir: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir_all(dir)
        .await
        .map_err(ScaffoldError::io("create directory", dir))?;

    let mut entries = fs::read_dir(dir)
        .await
        .map_err(ScaffoldError::io("read directory", dir))?;
    let first = entries
        .next_entry()
        .await
        .map_err(ScaffoldError::io("read directory", dir))?;

    if first.is_some() {
        return Err(ScaffoldError::TargetNotEmpty(dir.to_path_buf()));
    }

    Ok(())
}

async fn write_file(root: &Path, file: &RenderedFile) -> Result<usize, ScaffoldError> {
    let path = root.join(&file.relative_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(ScaffoldError::io("create directory", parent))?;
    }
    fs::write(&path, &file.content)
        .await
        .map_err(ScaffoldError::io("write", &path))?;
    Ok(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::validate_name;
    use crate::templates::TemplateSource;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::Value;
    use std::fs as stdfs;

    fn spec_in(base: &Path, name: &str) -> ProjectSpec {
        ProjectSpec::new(validate_name(name, |_| false).unwrap(), base)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    async fn demo_plan(spec: &ProjectSpec) -> MaterializePlan {
        let template = TemplateSource::Embedded.load().await.unwrap();
        MaterializePlan::for_project(spec, template, today(), &mut StdRng::seed_from_u64(42))
            .unwrap()
    }

    #[tokio::test]
    async fn test_materialize_demo_project() {
        let base = tempfile::tempdir().unwrap();
        let spec = spec_in(base.path(), "demo");
        let plan = demo_plan(&spec).await;

        let report = materialize(&spec, &plan).await.unwrap();
        let root = base.path().join("demo");

        // 3 template root files + 4 generated files + src/index.ts
        assert_eq!(report.files_written, 8);

        let package: Value =
            serde_json::from_str(&stdfs::read_to_string(root.join("package.json")).unwrap())
                .unwrap();
        assert_eq!(package["name"], "demo");

        let wrangler: Value =
            serde_json::from_str(&stdfs::read_to_string(root.join("wrangler.jsonc")).unwrap())
                .unwrap();
        assert_eq!(wrangler["name"], "demo");
        assert_eq!(wrangler["compatibility_date"], "2025-01-29");

        let env = stdfs::read_to_string(root.join(".env")).unwrap();
        let secret = env
            .lines()
            .next()
            .and_then(|line| line.strip_prefix("LIVE_SECRET="))
            .unwrap();
        assert_eq!(STANDARD.decode(secret).unwrap().len(), 64);

        for file in [
            ".gitignore",
            "ace.config.js",
            "tsconfig.json",
            "tsconfig.typesafe.json",
            "src/index.ts",
        ] {
            assert!(root.join(file).is_file(), "missing {}", file);
        }
    }

    #[tokio::test]
    async fn test_template_files_copied_verbatim() {
        let base = tempfile::tempdir().unwrap();
        let spec = spec_in(base.path(), "verbatim");
        let template = TemplateSource::Embedded.load().await.unwrap();
        let expected = template.root_files.clone();
        let plan =
            MaterializePlan::for_project(&spec, template, today(), &mut StdRng::seed_from_u64(1))
                .unwrap();

        materialize(&spec, &plan).await.unwrap();

        for file in expected {
            let written = stdfs::read(spec.target_dir().join(&file.relative_path)).unwrap();
            assert_eq!(written, file.content);
        }
    }

    #[tokio::test]
    async fn test_existing_empty_directory_is_reused() {
        let base = tempfile::tempdir().unwrap();
        stdfs::create_dir(base.path().join("empty")).unwrap();
        let spec = spec_in(base.path(), "empty");
        let plan = demo_plan(&spec).await;

        assert!(materialize(&spec, &plan).await.is_ok());
    }

    #[tokio::test]
    async fn test_nested_target_creates_intermediate_directories() {
        let base = tempfile::tempdir().unwrap();
        let spec = spec_in(&base.path().join("a/b"), "deep");
        let plan = MaterializePlan::new(vec![RenderedFile::new("x.txt", "x")], None);

        let report = materialize(&spec, &plan).await.unwrap();

        assert_eq!(report.files_written, 1);
        assert!(base.path().join("a/b/deep/src").is_dir());
    }

    #[tokio::test]
    async fn test_non_empty_directory_is_rejected() {
        let base = tempfile::tempdir().unwrap();
        let existing = base.path().join("busy");
        stdfs::create_dir(&existing).unwrap();
        stdfs::write(existing.join("keep.txt"), "mine").unwrap();

        let spec = spec_in(base.path(), "busy");
        let plan = demo_plan(&spec).await;
        let err = materialize(&spec, &plan).await.unwrap_err();

        assert!(matches!(err, ScaffoldError::TargetNotEmpty(_)));
        assert_eq!(stdfs::read_to_string(existing.join("keep.txt")).unwrap(), "mine");
        assert!(!existing.join("package.json").exists());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_siblings_in_place() {
        let base = tempfile::tempdir().unwrap();
        let spec = spec_in(base.path(), "partial");
        // Writing a file over the freshly created src/ directory fails
        let plan = MaterializePlan::new(
            vec![
                RenderedFile::new("first.txt", "1"),
                RenderedFile::new("src", "not a directory"),
                RenderedFile::new("last.txt", "3"),
            ],
            Some(TemplateSource::Embedded.load().await.unwrap().source_tree),
        );

        let err = materialize(&spec, &plan).await.unwrap_err();

        match err {
            ScaffoldError::PartialWrite { total, failures } => {
                assert_eq!(total, 4);
                assert_eq!(failures.len(), 1);
                assert!(matches!(
                    &failures[0],
                    ScaffoldError::Io { action: "write", path, .. } if path.ends_with("partial/src")
                ));
            }
            other => panic!("expected PartialWrite, got {:?}", other),
        }

        let root = spec.target_dir();
        assert_eq!(stdfs::read_to_string(root.join("first.txt")).unwrap(), "1");
        assert_eq!(stdfs::read_to_string(root.join("last.txt")).unwrap(), "3");
        assert!(root.join("src/index.ts").is_file());
    }

    #[tokio::test]
    async fn test_root_file_colliding_with_generated_file_is_rejected() {
        let base = tempfile::tempdir().unwrap();
        let spec = spec_in(base.path(), "clash");
        let mut template = TemplateSource::Embedded.load().await.unwrap();
        template.root_files.push(RenderedFile::new(".env", "SHADOW=1\n"));

        let err =
            MaterializePlan::for_project(&spec, template, today(), &mut StdRng::seed_from_u64(0))
                .unwrap_err();
        assert!(matches!(err, ScaffoldError::Template(_)));
    }
}
