//! Project setup orchestration
//!
//! A [`ScaffoldPlan`] is computed from the answers without touching disk.
//! [`ProjectBuilder`] then executes it in order: verify templates, render,
//! `git init`, install. The first failure stops the run; nothing already
//! written is removed.

use crate::config::{validate_name, PackageManager, ProjectConfig, Stacks};
use crate::error::{Result, ScaffoldError};
use crate::runtime::command::{CommandRunner, CommandSpec};
use crate::templates::{render, FileSystem, RenderContext, RenderSummary, TemplateEngine};
use std::fmt;
use std::path::{Path, PathBuf};

/// Subdirectory holding the frontend of a fullstack project
pub const CLIENT_DIR: &str = "client";
/// Subdirectory holding the backend of a fullstack project
pub const SERVER_DIR: &str = "server";

/// Which half of the template tree a job renders from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Frontend,
    Backend,
}

impl TemplateKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            TemplateKind::Frontend => "frontend",
            TemplateKind::Backend => "backend",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// One template subtree rendered into one destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub kind: TemplateKind,
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Everything a run will do, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub project_dir: PathBuf,
    pub context: RenderContext,
    pub renders: Vec<RenderJob>,
    pub package_manager: Option<PackageManager>,
    /// Directories that get `<manager> install`, empty when install was declined
    pub install_dirs: Vec<PathBuf>,
}

impl ScaffoldPlan {
    pub fn new(config: &ProjectConfig, template_root: &Path, cwd: &Path) -> Result<Self> {
        validate_name(&config.name)?;

        let project_dir = cwd.join(config.dir_name());
        let job = |kind: TemplateKind, framework: &str, dest: PathBuf| RenderJob {
            kind,
            source: template_root.join(kind.dir_name()).join(framework),
            dest,
        };

        let renders = match config.stacks {
            Stacks::Frontend(frontend) => vec![job(
                TemplateKind::Frontend,
                frontend.template_dir(),
                project_dir.clone(),
            )],
            Stacks::Backend(backend) => vec![job(
                TemplateKind::Backend,
                backend.template_dir(),
                project_dir.clone(),
            )],
            Stacks::Fullstack { frontend, backend } => vec![
                job(
                    TemplateKind::Frontend,
                    frontend.template_dir(),
                    project_dir.join(CLIENT_DIR),
                ),
                job(
                    TemplateKind::Backend,
                    backend.template_dir(),
                    project_dir.join(SERVER_DIR),
                ),
            ],
        };

        let install_dirs = if config.install.is_some() {
            renders.iter().map(|job| job.dest.clone()).collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            context: RenderContext::for_project(&config.name),
            project_dir,
            renders,
            package_manager: config.install,
            install_dirs,
        })
    }

    /// Check that every template subtree exists before anything is written
    pub fn verify_templates<F: FileSystem>(&self, fs: &F) -> Result<()> {
        for job in &self.renders {
            if !fs.is_dir(&job.source) {
                return Err(ScaffoldError::TemplateNotFound {
                    path: job.source.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A unit of visible work reported to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Render { kind: TemplateKind, dest: PathBuf },
    GitInit { dir: PathBuf },
    Install { manager: PackageManager, dir: PathBuf },
}

/// Receives step transitions while a plan runs
pub trait Progress {
    fn started(&mut self, step: &Step);
    fn finished(&mut self, step: &Step);
    fn failed(&mut self, step: &Step, error: &ScaffoldError);
}

/// Progress sink that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn started(&mut self, _: &Step) {}
    fn finished(&mut self, _: &Step) {}
    fn failed(&mut self, _: &Step, _: &ScaffoldError) {}
}

impl<P: Progress + ?Sized> Progress for &mut P {
    fn started(&mut self, step: &Step) {
        (**self).started(step)
    }
    fn finished(&mut self, step: &Step) {
        (**self).finished(step)
    }
    fn failed(&mut self, step: &Step, error: &ScaffoldError) {
        (**self).failed(step, error)
    }
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub project_dir: PathBuf,
    pub rendered: Vec<(PathBuf, RenderSummary)>,
    pub installed: Vec<PathBuf>,
}

impl ScaffoldReport {
    /// Files written across all render jobs
    pub fn files(&self) -> usize {
        self.rendered.iter().map(|(_, summary)| summary.files()).sum()
    }
}

/// Executes a [`ScaffoldPlan`]
pub struct ProjectBuilder<F, R, P> {
    fs: F,
    runner: R,
    progress: P,
    engine: TemplateEngine,
}

impl<F: FileSystem, R: CommandRunner, P: Progress> ProjectBuilder<F, R, P> {
    pub fn new(fs: F, runner: R, progress: P) -> Self {
        Self {
            fs,
            runner,
            progress,
            engine: TemplateEngine::new(),
        }
    }

    pub async fn build(&mut self, plan: &ScaffoldPlan) -> Result<ScaffoldReport> {
        plan.verify_templates(&self.fs)?;

        let mut rendered = Vec::with_capacity(plan.renders.len());
        for job in &plan.renders {
            let step = Step::Render {
                kind: job.kind,
                dest: job.dest.clone(),
            };
            self.progress.started(&step);
            let result = render(&self.fs, &self.engine, &job.source, &job.dest, &plan.context);
            let summary = self.track(&step, result)?;
            log::info!(
                "rendered {} template into {} ({} files)",
                job.kind,
                job.dest.display(),
                summary.files()
            );
            rendered.push((job.dest.clone(), summary));
        }

        let step = Step::GitInit {
            dir: plan.project_dir.clone(),
        };
        self.progress.started(&step);
        let result = self
            .runner
            .run(&CommandSpec::git_init(&plan.project_dir))
            .await;
        self.track(&step, result)?;

        let mut installed = Vec::new();
        if let Some(manager) = plan.package_manager {
            for dir in &plan.install_dirs {
                let step = Step::Install {
                    manager,
                    dir: dir.clone(),
                };
                self.progress.started(&step);
                let result = self
                    .runner
                    .run(&CommandSpec::install(manager.program(), dir))
                    .await;
                self.track(&step, result)?;
                installed.push(dir.clone());
            }
        }

        Ok(ScaffoldReport {
            project_dir: plan.project_dir.clone(),
            rendered,
            installed,
        })
    }

    fn track<T>(&mut self, step: &Step, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.progress.finished(step),
            Err(e) => self.progress.failed(step, e),
        }
        result
    }
}
