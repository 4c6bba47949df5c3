//! Live Scaffolder Core - library behind the `create-ace-live` CLI
//!
//! Creates a new Ace Live Server project: asks for a project name, then
//! writes a fixed template (plus a few generated files) into a fresh
//! directory named after it.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Name validation, file rendering, template loading, runtime detection
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait, the name prompt loop, and `materialize`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use live_scaffolder_core::{materialize, project, templates, MaterializePlan};
//!
//! let name = project::validate_name("demo", |p| p.exists())?;
//! let spec = project::ProjectSpec::new(name, &std::env::current_dir()?);
//! let template = templates::TemplateSource::Embedded.load().await?;
//! let plan = MaterializePlan::for_project(&spec, template, templates::today_utc(), &mut rand::rngs::OsRng)?;
//! materialize(&spec, &plan).await?;
//! ```

pub mod error;
pub mod materialize;
pub mod product;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::ScaffoldError;
pub use materialize::{materialize, MaterializePlan, MaterializeReport};
pub use product::ProductConfig;
pub use project::{validate_name, NameRejection, ProjectName, ProjectSpec};
pub use runtime::{require_node, RuntimeInfo};
pub use templates::{RenderedFile, TemplateManifest, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
