//! Host filesystem probes backed by `std::fs`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::filesystem::{FileKind, FilesystemProbe};

/// Probes against the real filesystem of the running host
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFilesystem;

impl HostFilesystem {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FilesystemProbe for HostFilesystem {
    fn lstat(&self, path: &Path) -> io::Result<FileKind> {
        let kind = fs::symlink_metadata(path).map(|m| FileKind::from_file_type(m.file_type()));
        trace!(path = %path.display(), result = ?kind.as_ref().ok(), "lstat");
        kind
    }

    fn stat(&self, path: &Path) -> io::Result<FileKind> {
        fs::metadata(path).map(|m| FileKind::from_file_type(m.file_type()))
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        fs::read_link(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lstat_reports_kinds() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dir");
        let file = temp.path().join("file");
        let link = temp.path().join("link");
        fs::create_dir(&dir).unwrap();
        fs::write(&file, b"x").unwrap();
        std::os::unix::fs::symlink(&dir, &link).unwrap();

        let probe = HostFilesystem::new();
        assert_eq!(probe.lstat(&dir).unwrap(), FileKind::Directory);
        assert_eq!(probe.lstat(&file).unwrap(), FileKind::File);
        assert_eq!(probe.lstat(&link).unwrap(), FileKind::Symlink);
        assert_eq!(probe.stat(&link).unwrap(), FileKind::Directory);
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        let probe = HostFilesystem::new();
        let err = probe.lstat(&temp.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!probe.exists(&temp.path().join("missing")));
        assert!(probe.is_dir(temp.path()));
    }

    #[test]
    fn test_read_link_does_not_resolve() {
        let temp = TempDir::new().unwrap();
        let link = temp.path().join("snap");
        std::os::unix::fs::symlink("var/lib/snapd/snap", &link).unwrap();

        let probe = HostFilesystem::new();
        assert_eq!(
            probe.read_link(&link).unwrap(),
            PathBuf::from("var/lib/snapd/snap")
        );
        assert!(probe.canonicalize(&link).is_err());
    }
}
