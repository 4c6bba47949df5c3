//! Rendering of the generated project files
//!
//! Everything here is pure given its inputs: the project name, the current
//! UTC date, and an RNG for the secret.

use crate::error::ScaffoldError;
use crate::project::ProjectName;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{Days, NaiveDate, Utc};
use rand::{CryptoRng, RngCore};
use serde::Serialize;
use std::path::PathBuf;

pub const PACKAGE_JSON: &str = "package.json";
pub const DOT_ENV: &str = ".env";
pub const GITIGNORE: &str = ".gitignore";
pub const WRANGLER_JSONC: &str = "wrangler.jsonc";

/// Key of the generated secret in `.env`
pub const SECRET_KEY: &str = "LIVE_SECRET";

/// Number of random bytes behind the secret
pub const SECRET_BYTES: usize = 64;

/// How far the compatibility date trails today
pub const COMPATIBILITY_DATE_LAG_DAYS: u64 = 3;

/// Name of the Durable Object class exported by the template's `src/index.ts`
pub const DURABLE_OBJECT_CLASS: &str = "LiveDurableObject";

/// Binding under which the worker reaches the Durable Object
pub const DURABLE_OBJECT_BINDING: &str = "LIVE_DURABLE_OBJECT";

/// A file ready to be written, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub relative_path: PathBuf,
    pub content: Vec<u8>,
}

impl RenderedFile {
    pub fn new(relative_path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct PackageJson<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    module_type: &'static str,
    version: &'static str,
    engines: Engines,
    scripts: Scripts,
    #[serde(rename = "devDependencies")]
    dev_dependencies: DevDependencies,
}

#[derive(Serialize)]
struct Engines {
    node: &'static str,
}

#[derive(Serialize)]
struct Scripts {
    bump: &'static str,
    #[serde(rename = "cf-typegen")]
    cf_typegen: &'static str,
    dev: &'static str,
    #[serde(rename = "dev-fresh")]
    dev_fresh: &'static str,
    build: &'static str,
    typesafe: &'static str,
}

#[derive(Serialize)]
struct DevDependencies {
    #[serde(rename = "@acets-team/ace")]
    ace: &'static str,
    #[serde(rename = "@types/node")]
    types_node: &'static str,
    typescript: &'static str,
    wrangler: &'static str,
}

impl<'a> PackageJson<'a> {
    fn for_project(name: &'a ProjectName) -> Self {
        Self {
            name: name.as_str(),
            module_type: "module",
            version: "0.0.1",
            engines: Engines { node: ">=22" },
            scripts: Scripts {
                bump: "ace build local",
                cf_typegen: "wrangler types",
                dev: "ace build local && wrangler dev",
                dev_fresh: "rm -rf .ace && npm run dev",
                build: "ace build prod && wrangler build",
                typesafe: "tsc --project tsconfig.typesafe.json",
            },
            dev_dependencies: DevDependencies {
                ace: "^0.8.1",
                types_node: "^24.10.0",
                typescript: "^5.9.3",
                wrangler: "^4.46.0",
            },
        }
    }
}

/// `package.json` with 2-space indentation
pub fn render_package_json(name: &ProjectName) -> Result<RenderedFile, ScaffoldError> {
    let json = serde_json::to_string_pretty(&PackageJson::for_project(name)).map_err(|source| {
        ScaffoldError::Render {
            file: PACKAGE_JSON,
            source,
        }
    })?;
    Ok(RenderedFile::new(PACKAGE_JSON, format!("{}\n", json)))
}

/// Base64 of [`SECRET_BYTES`] bytes drawn from `rng`
pub fn generate_secret<R: RngCore + CryptoRng>(rng: &mut R) -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rng.fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// `.env` holding a fresh secret and a hint on how to push it to production
pub fn render_dot_env<R: RngCore + CryptoRng>(rng: &mut R) -> RenderedFile {
    let content = format!(
        "{}={}\n\n# npx wrangler secret put\n",
        SECRET_KEY,
        generate_secret(rng)
    );
    RenderedFile::new(DOT_ENV, content)
}

pub fn render_gitignore() -> RenderedFile {
    RenderedFile::new(
        GITIGNORE,
        ".env\ndist\nnode_modules\n.wrangler\nworker-configuration.d.ts\n",
    )
}

/// Today's date in UTC, time of day discarded
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// `today` minus [`COMPATIBILITY_DATE_LAG_DAYS`], formatted `YYYY-MM-DD`
pub fn compatibility_date(today: NaiveDate) -> String {
    (today - Days::new(COMPATIBILITY_DATE_LAG_DAYS))
        .format("%Y-%m-%d")
        .to_string()
}

/// `wrangler.jsonc` declaring the worker and its Durable Object binding
pub fn render_wrangler_jsonc(
    name: &ProjectName,
    compatibility_date: &str,
) -> Result<RenderedFile, ScaffoldError> {
    let quoted_name = serde_json::to_string(name.as_str()).map_err(|source| {
        ScaffoldError::Render {
            file: WRANGLER_JSONC,
            source,
        }
    })?;

    let content = format!(
        r#"{{
  "$schema": "node_modules/wrangler/config-schema.json",
  "name": {name},
  "main": "src/index.ts",
  "compatibility_date": "{date}",
  "compatibility_flags": [
    "nodejs_compat"
  ],
  "observability": {{
    "enabled": true
  }},
  "migrations": [
    {{
      "new_sqlite_classes": [
        "{class}"
      ],
      "tag": "v1"
    }}
  ],
  "durable_objects": {{
    "bindings": [
      {{
        "class_name": "{class}",
        "name": "{binding}"
      }}
    ]
  }}
}}
"#,
        name = quoted_name,
        date = compatibility_date,
        class = DURABLE_OBJECT_CLASS,
        binding = DURABLE_OBJECT_BINDING,
    );

    Ok(RenderedFile::new(WRANGLER_JSONC, content))
}

/// All generated (non-template) files for a project
pub fn render_project_files<R: RngCore + CryptoRng>(
    name: &ProjectName,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Vec<RenderedFile>, ScaffoldError> {
    Ok(vec![
        render_dot_env(rng),
        render_package_json(name)?,
        render_gitignore(),
        render_wrangler_jsonc(name, &compatibility_date(today))?,
    ])
}
