//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to define the product identity, the
//! runtime it targets, and what the operator is told after project creation.

use crate::project::ProjectSpec;

/// Configuration trait for the scaffolding CLI
///
/// Defines:
/// - Product identity (display name)
/// - Template override environment variable
/// - Minimum Node.js major version the generated project runs on
/// - Documentation links
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable that points at an on-disk template directory
    fn template_dir_env(&self) -> &'static str;

    /// Lowest Node.js major version the generated project supports
    fn min_node_major(&self) -> u64;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, spec: &ProjectSpec) -> Vec<String>;

    /// Greeting shown when the interactive session starts
    fn welcome(&self) -> String {
        format!("Welcome to {}!", self.display_name())
    }
}
