//! create-ace-live - Project scaffolding for Ace Live Server

use clap::Parser;
use colored::Colorize;
use live_scaffolder_core::{ProductConfig, ProjectSpec, ScaffoldError};
use std::process::ExitCode;

/// Ace Live Server product configuration
#[derive(Clone)]
pub struct AceLiveConfig;

impl ProductConfig for AceLiveConfig {
    fn display_name(&self) -> &'static str {
        "Ace Live Server"
    }

    fn template_dir_env(&self) -> &'static str {
        "ACE_LIVE_TEMPLATE_DIR"
    }

    fn min_node_major(&self) -> u64 {
        22
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/acets-team/ace"
    }

    fn next_steps(&self, spec: &ProjectSpec) -> Vec<String> {
        vec![
            format!("cd {}", spec.name()),
            "npm install".to_string(),
            "npm run cf-typegen".to_string(),
            "npm run dev".to_string(),
        ]
    }
}

/// Takes no arguments; the project name is asked for interactively
#[derive(Parser, Debug)]
#[command(name = "create-ace-live")]
#[command(about = "CLI for scaffolding Ace Live Server projects")]
#[command(version)]
pub struct Args {}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let _args = Args::parse();
    let config = AceLiveConfig;

    let result = live_scaffolder_core::run(&config).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    ExitCode::from(exit_status(&result))
}

/// Report a failed run on stderr and map the outcome to a process exit status
fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", error_message(e));
            1
        }
    }
}

fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ScaffoldError>() {
        Some(e) if e.is_precondition() => format!("❌ {}", e).red().to_string(),
        _ => format!("{} {:#}", "Error:".red().bold(), err),
    }
}
