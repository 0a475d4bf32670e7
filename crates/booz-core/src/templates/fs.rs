//! Filesystem capability used by the renderer
//!
//! The renderer only needs a handful of operations, so they sit behind a
//! trait. `RealFs` is the host filesystem, `MemoryFs` is an in-memory tree
//! that tests and embedders can inspect without touching disk.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use walkdir::WalkDir;

/// Failure of an operation that touches more than the path it was given.
///
/// Listing can fail on a child entry and copying on either end, so `path` is
/// the one actually at fault.
#[derive(Error, Debug)]
#[error("{}: {source}", path.display())]
pub struct FsError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl FsError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
}

/// A single child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: OsString,
    pub kind: EntryKind,
}

/// Operations the renderer performs on source and destination trees
pub trait FileSystem {
    /// List the direct children of `dir`
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, FsError>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write `contents` to `path`, replacing any existing file. The parent must exist.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Copy a file byte-for-byte
    fn copy(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let bytes = self.read(from).map_err(|e| FsError::new(from, e))?;
        self.write(to, &bytes).map_err(|e| FsError::new(to, e))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn is_dir(&self, path: &Path) -> bool;

    /// Absolute form of `path` with links resolved
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, FsError> {
        (**self).list(dir)
    }
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        (**self).write(path, contents)
    }
    fn copy(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        (**self).copy(from, to)
    }
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }
    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        (**self).canonicalize(path)
    }
}

/// The host filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, FsError> {
        let mut entries = Vec::new();
        // Links are followed so a symlinked file is copied as its target's content
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                // a link looping back to an ancestor is reported at the link
                let path = e.path().unwrap_or(dir).to_path_buf();
                FsError::new(path, io::Error::from(e))
            })?;
            let kind = if entry.file_type().is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            entries.push(Entry {
                name: entry.file_name().to_os_string(),
                kind,
            });
        }
        Ok(entries)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let read_err = |e| FsError::new(from, e);
        let write_err = |e| FsError::new(to, e);

        // permission bits come along, e.g. executable scripts
        let permissions = std::fs::metadata(from).map_err(read_err)?.permissions();
        let bytes = std::fs::read(from).map_err(read_err)?;
        std::fs::write(to, bytes).map_err(write_err)?;
        std::fs::set_permissions(to, permissions).map_err(write_err)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// An in-memory tree keyed by path
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn nodes(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Node>> {
        self.nodes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a file, creating its parent directories
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        self.write(path, &contents.into())
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) -> io::Result<()> {
        self.create_dir_all(path.as_ref())
    }

    /// Contents of a file, if `path` is one
    pub fn file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.nodes().get(path.as_ref()) {
            Some(Node::File(bytes)) => Some(bytes.clone()),
            _ => None,
        }
    }

    /// Every file and directory below `root`, relative to it, in path order
    pub fn paths_under(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = root.as_ref();
        self.nodes()
            .keys()
            .filter_map(|p| p.strip_prefix(root).ok())
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect()
    }
}

impl FileSystem for MemoryFs {
    fn list(&self, dir: &Path) -> Result<Vec<Entry>, FsError> {
        let nodes = self.nodes();
        match nodes.get(dir) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(FsError::new(
                    dir,
                    io::Error::new(
                        io::ErrorKind::Other,
                        format!("not a directory: {}", dir.display()),
                    ),
                ))
            }
            None => return Err(FsError::new(dir, not_found(dir))),
        }

        Ok(nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .filter_map(|(path, node)| {
                let name = path.file_name()?.to_os_string();
                let kind = match node {
                    Node::Dir => EntryKind::Dir,
                    Node::File(_) => EntryKind::File,
                };
                Some(Entry { name, kind })
            })
            .collect())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.nodes().get(path) {
            Some(Node::File(bytes)) => Ok(bytes.clone()),
            Some(Node::Dir) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut nodes = self.nodes();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if nodes.get(parent) != Some(&Node::Dir) {
                return Err(not_found(parent));
            }
        }
        if nodes.get(path) == Some(&Node::Dir) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            ));
        }
        nodes.insert(path.to_path_buf(), Node::File(contents.to_vec()));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.nodes();
        for ancestor in path.ancestors().filter(|p| !p.as_os_str().is_empty()) {
            match nodes.get(ancestor) {
                Some(Node::Dir) => {}
                Some(Node::File(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("file exists: {}", ancestor.display()),
                    ))
                }
                None => {
                    nodes.insert(ancestor.to_path_buf(), Node::Dir);
                }
            }
        }
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.nodes().get(path) == Some(&Node::Dir)
    }

    /// There are no links in memory, so every existing path is its own resolution
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        if self.nodes().contains_key(path) {
            Ok(path.to_path_buf())
        } else {
            Err(not_found(path))
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}
