//! Booz CLI - Interactive scaffolding for frontend, backend and fullstack projects

use anyhow::Result;
use booz_core::{ProductConfig, ProjectConfig, Stacks};
use clap::Parser;
use std::path::Path;

/// Booz product configuration
#[derive(Clone)]
pub struct BoozConfig;

impl ProductConfig for BoozConfig {
    fn name(&self) -> &'static str {
        "booz"
    }

    fn display_name(&self) -> &'static str {
        "BOOZ"
    }

    fn template_dir_env(&self) -> &'static str {
        "BOOZ_TEMPLATE_DIR"
    }

    fn bundled_template_dir(&self) -> &'static str {
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates")
    }

    fn banner(&self) -> String {
        [
            "██████╗  ██████╗  ██████╗ ███████╗",
            "██╔══██╗██╔═══██╗██╔═══██╗╚══███╔╝",
            "██████╔╝██║   ██║██║   ██║  ███╔╝ ",
            "██╔══██╗██║   ██║██║   ██║ ███╔╝  ",
            "██████╔╝╚██████╔╝╚██████╔╝███████╗",
            "╚═════╝  ╚═════╝  ╚═════╝ ╚══════╝",
        ]
        .join("\n")
    }

    fn next_steps(&self, dir: &Path, config: &ProjectConfig) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();
        let manager = config.package_manager();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            let shown = current
                .as_deref()
                .and_then(|cwd| dir.strip_prefix(cwd).ok())
                .unwrap_or(dir);
            steps.push(format!("cd {}", shown.display()));
        }

        match config.stacks {
            Stacks::Fullstack { .. } => {
                // Step 2: Install per half if that was skipped
                if config.install.is_none() {
                    steps.push(format!("(cd client && {} install)", manager));
                    steps.push(format!("(cd server && {} install)", manager));
                }
                // Step 3: Start both dev servers
                steps.push(format!("(cd client && {})", manager.run_command("dev")));
                steps.push(format!("(cd server && {})", manager.run_command("dev")));
            }
            Stacks::Frontend(_) | Stacks::Backend(_) => {
                if config.install.is_none() {
                    steps.push(format!("{} install", manager));
                }
                steps.push(manager.run_command("dev"));
            }
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "booz")]
#[command(about = "Interactive CLI for scaffolding frontend, backend and fullstack projects")]
#[command(version)]
pub struct Args {}

#[tokio::main]
async fn main() -> Result<()> {
    let _args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::new().filter_or("BOOZ_LOG", "off")).init();

    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let config = BoozConfig;
    log::debug!("starting {}", config.name());

    let result = booz_core::run(&config).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
