//! Tool detection for git and package managers

use std::process::Command;

/// Tool detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub version: Option<String>,
    pub available: bool,
}

impl ToolInfo {
    /// Short status used as a prompt hint
    pub fn hint(&self) -> String {
        match (&self.version, self.available) {
            (Some(version), true) => format!("v{}", version.trim_start_matches('v')),
            (None, true) => "installed".to_string(),
            (_, false) => "not found".to_string(),
        }
    }
}

/// Check whether `program` is on PATH by asking for its version
pub fn check_tool(program: &str) -> ToolInfo {
    let output = version_command(program).output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty());
            ToolInfo {
                name: program.to_string(),
                version,
                available: true,
            }
        }
        _ => ToolInfo {
            name: program.to_string(),
            version: None,
            available: false,
        },
    }
}

fn version_command(program: &str) -> Command {
    // npm, pnpm and yarn are .cmd shims on Windows and need the shell
    let mut cmd = if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(program);
        cmd
    } else {
        Command::new(program)
    };
    cmd.arg("--version");
    cmd
}
