//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to brand the prompts, point at its
//! template tree, and describe what to do once a project exists.

use crate::config::ProjectConfig;
use std::path::Path;

/// Configuration trait for a scaffolding product
///
/// Each binary implements this trait to define:
/// - Product identity (name, display name, banner)
/// - Where its template tree lives
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the command and env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable name for overriding the template root
    fn template_dir_env(&self) -> &'static str;

    /// Template root used when nothing else is found
    fn bundled_template_dir(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, project_dir: &Path, config: &ProjectConfig) -> Vec<String>;

    /// ASCII banner printed before the first prompt
    fn banner(&self) -> String {
        self.display_name().to_uppercase()
    }
}
