//! Node.js detection and the minimum-version precondition

use crate::error::ScaffoldError;
use semver::Version;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    let output = Command::new("node").arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name: "Node.js",
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name: "Node.js",
            version: None,
            available: false,
        },
    }
}

/// Parse a version string as printed by `node --version` (e.g. `v22.11.0`)
pub fn parse_version(version_str: &str) -> Result<Version, ScaffoldError> {
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).map_err(|_| ScaffoldError::UnparsableVersion(trimmed.to_string()))
}

/// Verify a detected runtime against the minimum major version
pub fn ensure_min_major(info: &RuntimeInfo, min_major: u64) -> Result<Version, ScaffoldError> {
    let raw = match (&info.version, info.available) {
        (Some(raw), true) => raw,
        _ => return Err(ScaffoldError::RuntimeMissing { required: min_major }),
    };

    let version = parse_version(raw)?;
    if version.major < min_major {
        return Err(ScaffoldError::RuntimeTooOld {
            required: min_major,
            found: raw.clone(),
        });
    }

    Ok(version)
}

/// Detect Node.js and fail unless it is at least `min_major`
pub fn require_node(min_major: u64) -> Result<RuntimeInfo, ScaffoldError> {
    let node = check_node();
    ensure_min_major(&node, min_major)?;
    Ok(node)
}
