//! Charm-style CLI prompts using cliclack

use crate::config::{
    locate_template_root, validate_name, BackendStack, FrontendStack, PackageManager,
    ProjectConfig, ProjectType,
};
use crate::error::{Result, ScaffoldError};
use crate::flow::{collect_config, Prompter};
use crate::product::ProductConfig;
use crate::project::{ProjectBuilder, ScaffoldPlan, ScaffoldReport, Step, TemplateKind};
use crate::runtime::{check_tool, SystemRunner};
use crate::templates::RealFs;
use anyhow::Context;
use cliclack::ProgressBar;
use colored::{ColoredString, Colorize};
use std::path::{Path, PathBuf};

const DEFAULT_NAME: &str = "my-app";

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C) -> anyhow::Result<()> {
    println!("{}", config.banner().truecolor(255, 105, 180));
    cliclack::intro(format!("Welcome to {}!", config.display_name()))?;

    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let template_root = locate_template_root(config);

    // Step 1: Ask the questions
    let project = match collect_config(&mut ClackPrompter, &cwd) {
        Ok(project) => project,
        Err(e) => return finish_early(e),
    };

    // Step 2: Render, init git, install
    let report = match build_project(&project, &template_root, &cwd).await {
        Ok(report) => report,
        Err(e) => return finish_early(e),
    };

    cliclack::log::success(format!(
        "Created {} files in {}",
        report.files(),
        report.project_dir.display()
    ))?;

    // Step 3: Show next steps
    print_next_steps(config, &report.project_dir, &project)?;

    Ok(())
}

async fn build_project(
    project: &ProjectConfig,
    template_root: &Path,
    cwd: &Path,
) -> Result<ScaffoldReport> {
    let plan = ScaffoldPlan::new(project, template_root, cwd)?;
    let mut builder = ProjectBuilder::new(RealFs, SystemRunner, ClackProgress::new(cwd));
    builder.build(&plan).await
}

/// Close the session for a run that stopped before the project was ready.
/// Cancellation is not a failure.
fn finish_early(error: ScaffoldError) -> anyhow::Result<()> {
    cliclack::outro_cancel(closing_notice(&error))?;
    if error.is_cancelled() {
        Ok(())
    } else {
        Err(error.into())
    }
}

fn closing_notice(error: &ScaffoldError) -> &'static str {
    if error.is_cancelled() {
        "Operation cancelled."
    } else {
        "Setup failed."
    }
}

/// Answers questions on the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn project_type(&mut self) -> Result<ProjectType> {
        let mut select = cliclack::select("What type of project do you want to create?");
        for project_type in ProjectType::ALL {
            let label = match project_type {
                ProjectType::Frontend => project_type.display_name().bright_blue(),
                ProjectType::Backend => project_type.display_name().bright_green(),
                ProjectType::Fullstack => project_type.display_name().cyan(),
            };
            select = select.item(project_type, label, "");
        }
        select.interact().map_err(ScaffoldError::from_prompt)
    }

    fn frontend(&mut self) -> Result<FrontendStack> {
        let mut select = cliclack::select("Choose a frontend framework:");
        for stack in FrontendStack::ALL {
            select = select.item(stack, frontend_label(stack), stack.hint());
        }
        select.interact().map_err(ScaffoldError::from_prompt)
    }

    fn backend(&mut self) -> Result<BackendStack> {
        let mut select = cliclack::select("Choose a backend framework:");
        for stack in BackendStack::ALL {
            select = select.item(stack, backend_label(stack), stack.hint());
        }
        select.interact().map_err(ScaffoldError::from_prompt)
    }

    fn project_name(&mut self) -> Result<String> {
        cliclack::input("Enter the project name:")
            .placeholder(DEFAULT_NAME)
            .default_input(DEFAULT_NAME)
            .validate(|input: &String| validate_name(input).map_err(|e| e.to_string()))
            .interact()
            .map_err(ScaffoldError::from_prompt)
    }

    fn continue_into_existing(&mut self, dir: &Path, entries: usize) -> Result<bool> {
        cliclack::log::warning(format!(
            "{} already has {} existing items",
            dir.display(),
            entries
        ))
        .map_err(ScaffoldError::from_prompt)?;

        cliclack::confirm("Continue anyway?")
            .initial_value(false)
            .interact()
            .map_err(ScaffoldError::from_prompt)
    }

    fn install_deps(&mut self) -> Result<bool> {
        cliclack::confirm("Install dependencies after setup?")
            .initial_value(true)
            .interact()
            .map_err(ScaffoldError::from_prompt)
    }

    fn package_manager(&mut self) -> Result<PackageManager> {
        let mut select = cliclack::select("Choose a package manager:");
        for manager in PackageManager::ALL {
            let hint = check_tool(manager.program()).hint();
            select = select.item(manager, manager_label(manager), hint);
        }
        select
            .initial_value(PackageManager::Pnpm)
            .interact()
            .map_err(ScaffoldError::from_prompt)
    }
}

fn frontend_label(stack: FrontendStack) -> ColoredString {
    match stack {
        FrontendStack::React => stack.display_name().truecolor(29, 196, 233),
        FrontendStack::Vue => stack.display_name().truecolor(0, 208, 132),
        FrontendStack::NextJs => stack.display_name().white(),
    }
}

fn backend_label(stack: BackendStack) -> ColoredString {
    match stack {
        BackendStack::Hono => stack.display_name().truecolor(255, 106, 0),
        BackendStack::NodeTs => stack.display_name().green(),
    }
}

fn manager_label(manager: PackageManager) -> ColoredString {
    match manager {
        PackageManager::Pnpm => manager.program().yellow(),
        PackageManager::Npm => manager.program().red(),
        PackageManager::Yarn => manager.program().cyan(),
    }
}

/// Shows builder steps as spinners and log lines
pub struct ClackProgress {
    base: PathBuf,
    spinner: Option<ProgressBar>,
}

impl ClackProgress {
    /// Paths in messages are shown relative to `base`
    pub fn new(base: &Path) -> Self {
        Self {
            base: base.to_path_buf(),
            spinner: None,
        }
    }
}

impl crate::project::Progress for ClackProgress {
    fn started(&mut self, step: &Step) {
        let message = started_message(step, &self.base);
        match step {
            // Installs print their own output, a spinner would fight with it
            Step::Install { .. } => {
                let _ = cliclack::log::step(message);
            }
            _ => {
                let spinner = cliclack::spinner();
                spinner.start(message);
                self.spinner = Some(spinner);
            }
        }
    }

    fn finished(&mut self, step: &Step) {
        let message = finished_message(step, &self.base);
        match self.spinner.take() {
            Some(spinner) => spinner.stop(message),
            None => {
                let _ = cliclack::log::success(message);
            }
        }
    }

    fn failed(&mut self, step: &Step, error: &ScaffoldError) {
        let message = format!("{}: {}", failed_message(step, &self.base), error);
        match self.spinner.take() {
            Some(spinner) => spinner.error(message),
            None => {
                let _ = cliclack::log::error(message);
            }
        }
    }
}

fn relative<'a>(path: &'a Path, base: &Path) -> &'a Path {
    path.strip_prefix(base).unwrap_or(path)
}

fn kind_title(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::Frontend => "Frontend",
        TemplateKind::Backend => "Backend",
    }
}

fn started_message(step: &Step, base: &Path) -> String {
    match step {
        Step::Render { kind, dest } => format!(
            "Rendering {} template into {}...",
            kind,
            relative(dest, base).display()
        ),
        Step::GitInit { .. } => "Initializing git repository...".to_string(),
        Step::Install { manager, dir } => format!(
            "Installing dependencies in {} with {}...",
            relative(dir, base).display(),
            manager
        ),
    }
}

fn finished_message(step: &Step, base: &Path) -> String {
    match step {
        Step::Render { kind, .. } => format!("{} template rendered.", kind_title(*kind)),
        Step::GitInit { .. } => "Git repository initialized.".to_string(),
        Step::Install { dir, .. } => format!(
            "Dependencies installed in {}.",
            relative(dir, base).display()
        ),
    }
}

fn failed_message(step: &Step, base: &Path) -> String {
    match step {
        Step::Render { kind, .. } => format!("Failed to render {} template", kind),
        Step::GitInit { .. } => "Failed to initialize git repository".to_string(),
        Step::Install { dir, .. } => format!(
            "Failed to install dependencies in {}",
            relative(dir, base).display()
        ),
    }
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    project: &ProjectConfig,
) -> anyhow::Result<()> {
    let steps = config.next_steps(project_dir, project);

    println!();
    println!("  {}", "Next steps".bold());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Project setup complete!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PackageManager;
    use std::io;

    #[test]
    fn test_every_early_exit_gets_a_closing_notice() {
        assert_eq!(closing_notice(&ScaffoldError::Cancelled), "Operation cancelled.");

        let broken_terminal = io::Error::from(io::ErrorKind::BrokenPipe);
        assert_eq!(
            closing_notice(&ScaffoldError::from_prompt(broken_terminal)),
            "Setup failed."
        );
        assert_eq!(
            closing_notice(&ScaffoldError::InvalidName("..".to_string())),
            "Setup failed."
        );
        assert_eq!(
            closing_notice(&ScaffoldError::TemplateNotFound {
                path: PathBuf::from("templates/frontend/react"),
            }),
            "Setup failed."
        );
    }

    #[test]
    fn test_messages_use_paths_relative_to_base() {
        let base = Path::new("/work");
        let step = Step::Install {
            manager: PackageManager::Pnpm,
            dir: PathBuf::from("/work/shop/client"),
        };
        assert_eq!(
            started_message(&step, base),
            "Installing dependencies in shop/client with pnpm..."
        );
        assert_eq!(
            finished_message(&step, base),
            "Dependencies installed in shop/client."
        );
    }

    #[test]
    fn test_render_messages() {
        let base = Path::new("/work");
        let step = Step::Render {
            kind: TemplateKind::Backend,
            dest: PathBuf::from("/work/api"),
        };
        assert_eq!(
            started_message(&step, base),
            "Rendering backend template into api..."
        );
        assert_eq!(finished_message(&step, base), "Backend template rendered.");
        assert_eq!(failed_message(&step, base), "Failed to render backend template");
    }

    #[test]
    fn test_paths_outside_base_are_shown_whole() {
        let step = Step::GitInit {
            dir: PathBuf::from("/elsewhere/app"),
        };
        assert_eq!(
            failed_message(&step, Path::new("/work")),
            "Failed to initialize git repository"
        );
        assert_eq!(
            relative(Path::new("/elsewhere/app"), Path::new("/work")),
            Path::new("/elsewhere/app")
        );
    }
}
