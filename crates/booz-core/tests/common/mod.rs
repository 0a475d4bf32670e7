#![allow(dead_code)]

use booz_core::project::{Progress, Step};
use booz_core::runtime::{CommandRunner, CommandSpec};
use booz_core::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

/// Template tree shipped in the repository
pub fn shipped_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

/// Write `files` (relative path, contents) under `root`
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, contents) in files {
        let path = root.join(path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }
}

/// Records commands instead of running them; optionally fails one program
#[derive(Default)]
pub struct RecordingRunner {
    pub commands: Vec<CommandSpec>,
    pub fail_program: Option<&'static str>,
}

impl RecordingRunner {
    pub fn failing(program: &'static str) -> Self {
        Self {
            commands: Vec::new(),
            fail_program: Some(program),
        }
    }

    /// (command line, directory) pairs in execution order
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.commands
            .iter()
            .map(|c| (c.to_string(), c.cwd.clone()))
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&mut self, spec: &CommandSpec) -> Result<()> {
        self.commands.push(spec.clone());
        if self.fail_program == Some(spec.program.as_str()) {
            return Err(ScaffoldError::Command {
                command: spec.to_string(),
                dir: spec.cwd.clone(),
                code: Some(1),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Started(Step),
    Finished(Step),
    Failed(Step),
}

/// Records step transitions
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Vec<Event>,
}

impl Progress for RecordingProgress {
    fn started(&mut self, step: &Step) {
        self.events.push(Event::Started(step.clone()));
    }
    fn finished(&mut self, step: &Step) {
        self.events.push(Event::Finished(step.clone()));
    }
    fn failed(&mut self, step: &Step, _: &ScaffoldError) {
        self.events.push(Event::Failed(step.clone()));
    }
}
