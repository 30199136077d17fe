//! Read-only filesystem probes

use std::io;
use std::path::{Path, PathBuf};

/// What kind of object a path refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Directory,
    Symlink,
    File,
    /// Sockets, fifos, devices
    Other,
}

impl FileKind {
    /// Classify a file type reported by the OS
    #[must_use]
    pub fn from_file_type(ft: std::fs::FileType) -> Self {
        if ft.is_symlink() {
            Self::Symlink
        } else if ft.is_dir() {
            Self::Directory
        } else if ft.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// Trait for the filesystem queries used while resolving the directory layout
///
/// Errors are returned as plain `io::Error` so callers can tell `NotFound`
/// apart from every other failure.
pub trait FilesystemProbe: Send + Sync {
    /// Inspect a path without following a trailing symlink
    fn lstat(&self, path: &Path) -> io::Result<FileKind>;

    /// Inspect a path, following symlinks
    fn stat(&self, path: &Path) -> io::Result<FileKind>;

    /// Read the target of a symlink without resolving it
    fn read_link(&self, path: &Path) -> io::Result<PathBuf>;

    /// Resolve every symlink along a path
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool {
        self.stat(path).is_ok()
    }

    /// Check if a path points to a directory.
    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.stat(path), Ok(FileKind::Directory))
    }
}
