//! External command execution
//!
//! Version control init and dependency installs are opaque to booz: run a
//! program in a directory and fail if it exits unsuccessfully.

use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// What happens to a child's stdio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Share the terminal with the child (installs show their progress)
    Inherit,
    /// Discard all output
    Silent,
}

/// A single command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub output: OutputMode,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
            output: OutputMode::Inherit,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// `git init`, output discarded
    pub fn git_init(dir: &Path) -> Self {
        Self::new("git", dir).arg("init").output(OutputMode::Silent)
    }

    /// `<manager> install`, output shown
    pub fn install(program: &str, dir: &Path) -> Self {
        Self::new(program, dir).arg("install")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs external commands to completion
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&mut self, spec: &CommandSpec) -> Result<()>;
}

impl<R: CommandRunner> CommandRunner for &mut R {
    async fn run(&mut self, spec: &CommandSpec) -> Result<()> {
        (**self).run(spec).await
    }
}

/// Runs commands as child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(spec: &CommandSpec) -> TokioCommand {
        // npm, pnpm and yarn are .cmd shims on Windows and need the shell
        let mut cmd = if cfg!(windows) {
            let mut cmd = TokioCommand::new("cmd");
            cmd.arg("/C").arg(&spec.program);
            cmd
        } else {
            TokioCommand::new(&spec.program)
        };
        cmd.args(&spec.args).current_dir(&spec.cwd);

        match spec.output {
            OutputMode::Inherit => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
            }
            OutputMode::Silent => {
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null());
            }
        }
        cmd
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&mut self, spec: &CommandSpec) -> Result<()> {
        log::debug!("running `{}` in {}", spec, spec.cwd.display());

        let status = Self::command(spec)
            .status()
            .await
            .map_err(|source| ScaffoldError::Spawn {
                command: spec.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::Command {
                command: spec.to_string(),
                dir: spec.cwd.clone(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        let spec = CommandSpec::install("pnpm", Path::new("shop/client"));
        assert_eq!(spec.to_string(), "pnpm install");
        assert_eq!(spec.output, OutputMode::Inherit);

        let spec = CommandSpec::git_init(Path::new("shop"));
        assert_eq!(spec.to_string(), "git init");
        assert_eq!(spec.output, OutputMode::Silent);
        assert_eq!(spec.cwd, PathBuf::from("shop"));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let spec = CommandSpec::new("booz-definitely-not-a-real-tool", dir.path())
            .output(OutputMode::Silent);

        let err = SystemRunner.run(&spec).await.unwrap_err();
        if cfg!(windows) {
            assert!(matches!(err, ScaffoldError::Command { .. }));
        } else {
            assert!(matches!(err, ScaffoldError::Spawn { .. }));
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_command_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let spec = CommandSpec::new("sh", dir.path())
            .arg("-c")
            .arg("exit 3")
            .output(OutputMode::Silent);

        let err = SystemRunner.run(&spec).await.unwrap_err();
        match err {
            ScaffoldError::Command { code, dir: failed_in, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(failed_in, dir.path());
            }
            other => panic!("expected command error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_in_given_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let spec = CommandSpec::new("sh", dir.path())
            .arg("-c")
            .arg("touch ran-here")
            .output(OutputMode::Silent);

        SystemRunner.run(&spec).await.unwrap();
        assert!(dir.path().join("ran-here").exists());
    }
}
