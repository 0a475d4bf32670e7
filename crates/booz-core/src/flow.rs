//! The question sequence, independent of any terminal library

use crate::config::{
    sanitize_name, validate_name, BackendStack, FrontendStack, PackageManager, ProjectConfig,
    ProjectType, Stacks,
};
use crate::error::{Result, ScaffoldError};
use std::path::Path;

/// One method per question. Returning `ScaffoldError::Cancelled` ends the flow.
pub trait Prompter {
    fn project_type(&mut self) -> Result<ProjectType>;
    fn frontend(&mut self) -> Result<FrontendStack>;
    fn backend(&mut self) -> Result<BackendStack>;
    fn project_name(&mut self) -> Result<String>;
    /// Asked only when the project directory already has `entries` items
    fn continue_into_existing(&mut self, dir: &Path, entries: usize) -> Result<bool>;
    fn install_deps(&mut self) -> Result<bool>;
    fn package_manager(&mut self) -> Result<PackageManager>;
}

/// Ask every question in order and build the run's configuration
pub fn collect_config<P: Prompter>(prompter: &mut P, cwd: &Path) -> Result<ProjectConfig> {
    let stacks = match prompter.project_type()? {
        ProjectType::Frontend => Stacks::Frontend(prompter.frontend()?),
        ProjectType::Backend => Stacks::Backend(prompter.backend()?),
        ProjectType::Fullstack => {
            let frontend = prompter.frontend()?;
            let backend = prompter.backend()?;
            Stacks::Fullstack { frontend, backend }
        }
    };

    let name = prompter.project_name()?;
    validate_name(&name)?;

    let project_dir = cwd.join(sanitize_name(&name));
    let existing = count_entries(&project_dir);
    if existing > 0 && !prompter.continue_into_existing(&project_dir, existing)? {
        return Err(ScaffoldError::Cancelled);
    }

    let install = if prompter.install_deps()? {
        Some(prompter.package_manager()?)
    } else {
        None
    };

    Ok(ProjectConfig::new(name, stacks, install))
}

fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.count())
        .unwrap_or(0)
}
