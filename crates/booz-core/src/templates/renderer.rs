//! Template tree rendering
//!
//! Reproduces a template directory under a destination. Files whose name ends
//! in [`TEMPLATE_SUFFIX`] go through placeholder substitution and lose the
//! suffix; every other file is copied byte-for-byte. Directories are mirrored,
//! including empty ones.
//!
//! Rendering stops at the first error. Output already written stays on disk.

use super::context::RenderContext;
use super::engine::TemplateEngine;
use super::fs::{EntryKind, FileSystem};
use crate::error::{Result, ScaffoldError};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

/// Marker suffix of files that need substitution
pub const TEMPLATE_SUFFIX: &str = ".hbs";

/// Counts of what a render produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub dirs: usize,
    pub rendered: usize,
    pub copied: usize,
}

impl RenderSummary {
    pub fn files(&self) -> usize {
        self.rendered + self.copied
    }
}

/// Destination name of a template file, or `None` for a plain file.
///
/// A name is a template only if something precedes the suffix, so a file
/// called exactly `.hbs` is plain. Names that are not UTF-8 are plain.
pub fn template_output_name(name: &OsStr) -> Option<&str> {
    name.to_str()?
        .strip_suffix(TEMPLATE_SUFFIX)
        .filter(|stem| !stem.is_empty())
}

/// A source directory waiting to be mirrored
struct PendingDir {
    src: PathBuf,
    dest: PathBuf,
    /// Resolved paths of `src` and every directory above it in the walk
    ancestors: Vec<PathBuf>,
}

/// Render the tree at `source` into `dest`.
///
/// `dest` and its ancestors are created as needed. `source` is never modified.
/// A directory link that leads back into its own ancestry is an error at the
/// link.
pub fn render<F: FileSystem>(
    fs: &F,
    engine: &TemplateEngine,
    source: &Path,
    dest: &Path,
    context: &RenderContext,
) -> Result<RenderSummary> {
    let mut summary = RenderSummary::default();
    let root = fs
        .canonicalize(source)
        .map_err(|e| ScaffoldError::io(source, e))?;
    let mut pending = vec![PendingDir {
        src: source.to_path_buf(),
        dest: dest.to_path_buf(),
        ancestors: vec![root],
    }];

    while let Some(dir) = pending.pop() {
        log::debug!("{} -> {}", dir.src.display(), dir.dest.display());

        fs.create_dir_all(&dir.dest)
            .map_err(|e| ScaffoldError::io(&dir.dest, e))?;
        summary.dirs += 1;

        let entries = fs.list(&dir.src)?;

        for entry in entries {
            let src = dir.src.join(&entry.name);

            if entry.kind == EntryKind::Dir {
                let resolved = fs
                    .canonicalize(&src)
                    .map_err(|e| ScaffoldError::io(&src, e))?;
                if dir.ancestors.contains(&resolved) {
                    let loop_err = io::Error::new(
                        io::ErrorKind::Other,
                        format!("link loops back to {}", resolved.display()),
                    );
                    return Err(ScaffoldError::io(src, loop_err));
                }

                let mut ancestors = dir.ancestors.clone();
                ancestors.push(resolved);
                pending.push(PendingDir {
                    dest: dir.dest.join(&entry.name),
                    src,
                    ancestors,
                });
                continue;
            }

            match template_output_name(&entry.name) {
                Some(output_name) => {
                    let target = dir.dest.join(output_name);
                    render_file(fs, engine, &src, &target, context)?;
                    summary.rendered += 1;
                }
                None => {
                    let target = dir.dest.join(&entry.name);
                    log::trace!("copy {}", src.display());
                    fs.copy(&src, &target)?;
                    summary.copied += 1;
                }
            }
        }
    }

    Ok(summary)
}

fn render_file<F: FileSystem>(
    fs: &F,
    engine: &TemplateEngine,
    src: &Path,
    target: &Path,
    context: &RenderContext,
) -> Result<()> {
    log::trace!("render {}", src.display());

    let content = fs
        .read_to_string(src)
        .map_err(|e| ScaffoldError::io(src, e))?;
    let rendered = engine
        .render(&content, context)
        .map_err(|source| ScaffoldError::Template {
            path: src.to_path_buf(),
            source,
        })?;
    fs.write(target, rendered.as_bytes())
        .map_err(|e| ScaffoldError::io(target, e))
}
