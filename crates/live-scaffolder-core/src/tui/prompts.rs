//! Charm-style CLI prompts using cliclack

use crate::error::ScaffoldError;
use crate::materialize::{materialize, MaterializePlan, MaterializeReport};
use crate::product::ProductConfig;
use crate::project::{acquire_project_name, NamePrompt, NameRejection, ProjectSpec};
use crate::runtime::{check, RuntimeInfo};
use crate::templates::{today_utc, LoadedTemplate, TemplateSource};
use anyhow::{Context, Result};
use colored::Colorize;
use rand::rngs::OsRng;
use std::io;
use std::path::Path;

/// Run the interactive scaffolding session
pub async fn run<C: ProductConfig>(config: &C) -> Result<()> {
    let base_dir = std::env::current_dir().context("Failed to resolve current directory")?;
    let spec = run_session(config, check::require_node, &mut ClackNamePrompt, &base_dir).await?;

    print_next_steps(config, &spec)?;

    Ok(())
}

/// Steps gate each other: runtime check, project name, then materialization
///
/// The runtime check runs before anything is printed, so an unsupported
/// Node.js ends the run with no session output and nothing on disk.
async fn run_session<C, R, P>(
    config: &C,
    require_runtime: R,
    prompt: &mut P,
    base_dir: &Path,
) -> Result<ProjectSpec>
where
    C: ProductConfig,
    R: FnOnce(u64) -> Result<RuntimeInfo, ScaffoldError>,
    P: NamePrompt + ?Sized,
{
    // Step 1: Node.js version precondition
    let node = require_runtime(config.min_node_major())?;

    cliclack::intro(config.welcome().bold().underline())?;
    cliclack::log::success(format!(
        "Detected {} ({})",
        node.name,
        node.version.as_deref().unwrap_or("unknown")
    ))?;

    // Step 2: Project name
    let name = acquire_project_name(prompt, |candidate| base_dir.join(candidate).exists())?;
    let spec = ProjectSpec::new(name, base_dir);

    // Step 3: Create project
    let source = TemplateSource::from_config(config);
    create_project(&spec, &source).await?;

    Ok(spec)
}

struct ClackNamePrompt;

impl NamePrompt for ClackNamePrompt {
    fn ask(&mut self) -> io::Result<String> {
        cliclack::input("🛠️ Project name")
            .placeholder("my-live-app")
            .required(false)
            .interact()
    }

    fn reject(&mut self, reason: &NameRejection) -> io::Result<()> {
        cliclack::log::warning(format!("⚠️ {}", reason))
    }

    fn release(&mut self) {
        let _ = console::Term::stderr().show_cursor();
    }
}

async fn create_project(spec: &ProjectSpec, source: &TemplateSource) -> Result<MaterializeReport> {
    let template = source.load().await?;
    cliclack::log::info(format!(
        "Template: {} ({})",
        template.summary(),
        source.describe()
    ))?;

    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    match write_project(spec, template).await {
        Ok(report) => {
            spinner.stop(format!(
                "Created {} files in {}",
                report.files_written,
                spec.target_dir().display()
            ));
            Ok(report)
        }
        Err(e) => {
            spinner.stop("Failed to create project");
            if let ScaffoldError::PartialWrite { .. } = e {
                cliclack::log::warning(format!(
                    "{} may be partially populated",
                    spec.target_dir().display()
                ))?;
            }
            Err(e.into())
        }
    }
}

async fn write_project(
    spec: &ProjectSpec,
    template: LoadedTemplate,
) -> Result<MaterializeReport, ScaffoldError> {
    let plan = MaterializePlan::for_project(spec, template, today_utc(), &mut OsRng)?;
    materialize(spec, &plan).await
}

fn print_next_steps<C: ProductConfig>(config: &C, spec: &ProjectSpec) -> Result<()> {
    let steps = config.next_steps(spec);

    println!();
    println!(
        "  {}",
        format!("🎉 Congratulations! \"{}\" created! 🎉", spec.name())
            .green()
            .bold()
            .underline()
    );
    println!();
    println!(
        "  {}",
        format!("🤓 {} quick steps to dev please:", steps.len())
            .blue()
            .bold()
    );
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("     {} {}", format!("{})", i + 1).blue(), step.cyan());
    }

    println!();
    cliclack::outro(
        format!(
            "💖 Thanks for creating w/ {}! ✨ Docs: {}",
            config.display_name(),
            config.docs_url()
        )
        .bold(),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Clone)]
    struct TestConfig;

    impl ProductConfig for TestConfig {
        fn display_name(&self) -> &'static str {
            "Test Live"
        }

        fn template_dir_env(&self) -> &'static str {
            "LIVE_SCAFFOLDER_TEST_TEMPLATE_DIR_UNSET"
        }

        fn min_node_major(&self) -> u64 {
            22
        }

        fn docs_url(&self) -> &'static str {
            "https://example.com/docs"
        }

        fn next_steps(&self, spec: &ProjectSpec) -> Vec<String> {
            vec![format!("cd {}", spec.name())]
        }
    }

    struct ScriptedPrompt {
        answers: VecDeque<&'static str>,
        asked: usize,
        released: usize,
    }

    impl ScriptedPrompt {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                asked: 0,
                released: 0,
            }
        }
    }

    impl NamePrompt for ScriptedPrompt {
        fn ask(&mut self) -> io::Result<String> {
            self.asked += 1;
            self.answers
                .pop_front()
                .map(str::to_string)
                .ok_or_else(|| io::Error::new(io::ErrorKind::Interrupted, "operator aborted"))
        }

        fn reject(&mut self, _reason: &NameRejection) -> io::Result<()> {
            Ok(())
        }

        fn release(&mut self) {
            self.released += 1;
        }
    }

    fn node(version: &str) -> RuntimeInfo {
        RuntimeInfo {
            name: "Node.js",
            version: Some(version.to_string()),
            available: true,
        }
    }

    fn is_empty_dir(path: &Path) -> bool {
        std::fs::read_dir(path).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_unsupported_runtime_stops_before_prompting() {
        let base = tempfile::tempdir().unwrap();
        let mut prompt = ScriptedPrompt::new(&["demo"]);

        let err = run_session(
            &TestConfig,
            |required| {
                Err(ScaffoldError::RuntimeTooOld {
                    required,
                    found: "v20.1.0".to_string(),
                })
            },
            &mut prompt,
            base.path(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::RuntimeTooOld { required: 22, .. })
        ));
        assert_eq!(prompt.asked, 0);
        assert!(is_empty_dir(base.path()));
    }

    #[tokio::test]
    async fn test_prompt_error_releases_and_writes_nothing() {
        let base = tempfile::tempdir().unwrap();
        let mut prompt = ScriptedPrompt::new(&[]);

        let err = run_session(&TestConfig, |_| Ok(node("v22.3.0")), &mut prompt, base.path())
            .await
            .unwrap_err();

        let io_err = err.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::Interrupted);
        assert_eq!(prompt.asked, 1);
        assert_eq!(prompt.released, 1);
        assert!(is_empty_dir(base.path()));
    }

    #[tokio::test]
    async fn test_session_creates_project_after_checks_pass() {
        let base = tempfile::tempdir().unwrap();
        let mut prompt = ScriptedPrompt::new(&["demo"]);

        let spec = run_session(&TestConfig, |_| Ok(node("v22.3.0")), &mut prompt, base.path())
            .await
            .unwrap();

        assert_eq!(spec.target_dir(), base.path().join("demo").as_path());
        assert_eq!(prompt.released, 1);
        assert!(spec.target_dir().join("package.json").is_file());
        assert!(spec.source_dir().join("index.ts").is_file());
    }
}
