//! Template tree rendering
//!
//! This module provides:
//! - The filesystem capability the renderer works through (`RealFs`, `MemoryFs`)
//! - Placeholder substitution with handlebars
//! - The recursive copy-and-substitute walk

pub mod context;
pub mod engine;
pub mod fs;
pub mod renderer;

pub use context::RenderContext;
pub use engine::TemplateEngine;
pub use fs::{Entry, EntryKind, FileSystem, FsError, MemoryFs, RealFs};
pub use renderer::{render, template_output_name, RenderSummary, TEMPLATE_SUFFIX};
