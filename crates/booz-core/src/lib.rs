//! Booz Core - project scaffolding from template trees
//!
//! This library turns a handful of answers (project type, frameworks, name,
//! install preference) into a project directory.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Template tree rendering, external commands, tool detection
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait, `Prompter` question flow and `ProjectBuilder`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use booz_core::{ProjectBuilder, ProjectConfig, ScaffoldPlan, Stacks, FrontendStack};
//! use booz_core::project::NoProgress;
//! use booz_core::runtime::SystemRunner;
//! use booz_core::templates::RealFs;
//!
//! let config = ProjectConfig::new("my app", Stacks::Frontend(FrontendStack::React), None);
//! let plan = ScaffoldPlan::new(&config, "templates".as_ref(), &std::env::current_dir()?)?;
//! ProjectBuilder::new(RealFs, SystemRunner, NoProgress).build(&plan).await?;
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod product;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{
    sanitize_name, BackendStack, FrontendStack, PackageManager, ProjectConfig, ProjectType, Stacks,
};
pub use error::{Result, ScaffoldError};
pub use flow::{collect_config, Prompter};
pub use product::ProductConfig;
pub use project::{ProjectBuilder, ScaffoldPlan, ScaffoldReport};
pub use templates::{render, RenderContext, RenderSummary, TemplateEngine};

#[cfg(feature = "tui")]
pub use tui::run;
