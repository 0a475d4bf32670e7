//! Error types for booz operations

use crate::templates::fs::FsError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a project setup.
///
/// Filesystem and template errors always carry the path that caused them so
/// the user can tell which file in a template tree is broken.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// The requested framework subtree does not exist under the template root.
    #[error("template not found: {}", path.display())]
    TemplateNotFound { path: PathBuf },

    /// A template file could not be compiled or rendered.
    #[error("failed to compile template: {}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: handlebars::RenderError,
    },

    /// A read, write, or copy failed.
    #[error("filesystem error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An external command could not be started at all.
    #[error("failed to run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// An external command ran and exited unsuccessfully.
    #[error("`{command}` failed in {} (exit code: {})", dir.display(), code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    Command {
        command: String,
        dir: PathBuf,
        code: Option<i32>,
    },

    /// The terminal could not be read from or written to.
    #[error("prompt failed")]
    Prompt(#[source] io::Error),

    #[error("invalid project name: {0}")]
    InvalidName(String),

    /// The user backed out of a prompt. Not a failure.
    #[error("operation cancelled")]
    Cancelled,
}

impl ScaffoldError {
    /// Tag an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Map a prompt result, treating an interrupted prompt as a cancellation
    pub fn from_prompt(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::Interrupted {
            Self::Cancelled
        } else {
            Self::Prompt(error)
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<FsError> for ScaffoldError {
    fn from(error: FsError) -> Self {
        Self::io(error.path, error.source)
    }
}

/// Alias for `Result<T, ScaffoldError>`.
pub type Result<T> = std::result::Result<T, ScaffoldError>;
