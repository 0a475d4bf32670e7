//! External commands and tool detection
//!
//! This module provides:
//! - Running version control and package manager commands
//! - Advisory detection of installed tools

pub mod check;
pub mod command;

pub use check::{check_tool, ToolInfo};
pub use command::{CommandRunner, CommandSpec, OutputMode, SystemRunner};
