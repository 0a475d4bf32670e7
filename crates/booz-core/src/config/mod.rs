//! Project configuration collected from the prompt flow
//!
//! Every prompt answer is a closed enum so the setup logic can match on it
//! exhaustively instead of comparing strings.

pub mod locate;

use crate::error::{Result, ScaffoldError};
use std::fmt;

pub use locate::locate_template_root;

/// What kind of project to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    Frontend,
    Backend,
    Fullstack,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [
        ProjectType::Frontend,
        ProjectType::Backend,
        ProjectType::Fullstack,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::Frontend => "Frontend",
            ProjectType::Backend => "Backend",
            ProjectType::Fullstack => "Fullstack (Frontend + Backend)",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Frontend frameworks with a template under `frontend/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontendStack {
    React,
    Vue,
    NextJs,
}

impl FrontendStack {
    pub const ALL: [FrontendStack; 3] = [FrontendStack::React, FrontendStack::Vue, FrontendStack::NextJs];

    /// Directory name under `frontend/` in the template tree
    pub fn template_dir(&self) -> &'static str {
        match self {
            FrontendStack::React => "react",
            FrontendStack::Vue => "vue",
            FrontendStack::NextJs => "nextjs",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FrontendStack::React => "React",
            FrontendStack::Vue => "Vue",
            FrontendStack::NextJs => "Next.js",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            FrontendStack::React => "vite + ts",
            FrontendStack::Vue | FrontendStack::NextJs => "",
        }
    }
}

impl fmt::Display for FrontendStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Backend frameworks with a template under `backend/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendStack {
    Hono,
    NodeTs,
}

impl BackendStack {
    pub const ALL: [BackendStack; 2] = [BackendStack::Hono, BackendStack::NodeTs];

    /// Directory name under `backend/` in the template tree
    pub fn template_dir(&self) -> &'static str {
        match self {
            BackendStack::Hono => "hono",
            BackendStack::NodeTs => "node-ts",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BackendStack::Hono => "Hono",
            BackendStack::NodeTs => "node-ts",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            BackendStack::Hono => "",
            BackendStack::NodeTs => "Node + Express + TypeScript",
        }
    }
}

impl fmt::Display for BackendStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Package managers that can install dependencies after setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PackageManager {
    Pnpm,
    #[default]
    Npm,
    Yarn,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] = [PackageManager::Pnpm, PackageManager::Npm, PackageManager::Yarn];

    /// Executable name
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Command that runs a package.json script
    pub fn run_command(&self, script: &str) -> String {
        match self {
            PackageManager::Npm => format!("npm run {}", script),
            other => format!("{} {}", other.program(), script),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

/// The chosen frameworks. Only valid combinations are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stacks {
    Frontend(FrontendStack),
    Backend(BackendStack),
    Fullstack {
        frontend: FrontendStack,
        backend: BackendStack,
    },
}

impl Stacks {
    pub fn project_type(&self) -> ProjectType {
        match self {
            Stacks::Frontend(_) => ProjectType::Frontend,
            Stacks::Backend(_) => ProjectType::Backend,
            Stacks::Fullstack { .. } => ProjectType::Fullstack,
        }
    }
}

/// Answers for a single run, built once and passed down unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Project name as typed by the user. Used unsanitized as the `name` placeholder.
    pub name: String,
    pub stacks: Stacks,
    /// `None` when the user declined dependency installation
    pub install: Option<PackageManager>,
}

impl ProjectConfig {
    pub fn new(name: impl Into<String>, stacks: Stacks, install: Option<PackageManager>) -> Self {
        Self {
            name: name.into(),
            stacks,
            install,
        }
    }

    /// Directory name for the project
    pub fn dir_name(&self) -> String {
        sanitize_name(&self.name)
    }

    /// Package manager used for installs and next-step hints (npm when install was declined)
    pub fn package_manager(&self) -> PackageManager {
        self.install.unwrap_or_default()
    }
}

/// Replace every run of whitespace with a single `-`
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}

/// Reject names that would not produce a single directory under the working directory
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ScaffoldError::InvalidName(
            "project name cannot be empty".to_string(),
        ));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ScaffoldError::InvalidName(format!(
            "'{}' contains a path separator",
            name
        )));
    }
    if matches!(name.trim(), "." | "..") {
        return Err(ScaffoldError::InvalidName(format!(
            "'{}' is not a directory name",
            name
        )));
    }
    Ok(())
}
