//! Snap mount directory detection
//!
//! Distributions ship snapd with one of two mount layouts: snaps under
//! `/snap`, or under `/var/lib/snapd/snap` with `/snap` either missing or a
//! symlink pointing there. Which one applies is read off the filesystem below
//! the global root.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use snapd_errors::{DirsError, MountDirError};
use snapd_platform::{FileKind, FilesystemProbe, Platform};
use snapd_release::ReleaseInfo;
use tracing::{debug, warn};

use crate::constants::{
    ALT_SNAP_MOUNT_DIR, BASE_SNAP_MARKER, DEFAULT_SNAP_MOUNT_DIR,
    SNAP_MOUNT_DIR_UNRESOLVED_PLACEHOLDER, SPECIAL_DEFAULT_DIR_DISTROS,
};
use crate::util::join_under;

/// Result of resolving the mount directory for one root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountDirOutcome {
    Resolved(PathBuf),
    Unresolved(DirsError),
}

impl MountDirOutcome {
    /// The mount directory to publish; the placeholder when unresolved
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Resolved(path) => path,
            Self::Unresolved(_) => Path::new(SNAP_MOUNT_DIR_UNRESOLVED_PLACEHOLDER),
        }
    }

    /// The detection failure, if any
    #[must_use]
    pub fn error(&self) -> Option<&DirsError> {
        match self {
            Self::Resolved(_) => None,
            Self::Unresolved(err) => Some(err),
        }
    }
}

/// Whether the process runs inside a base snap mounted at `/`
///
/// Any failure other than the marker being absent counts as "not inside".
#[must_use]
pub fn is_inside_base_snap(fs: &dyn FilesystemProbe) -> bool {
    match fs.stat(Path::new(BASE_SNAP_MARKER)) {
        Ok(_) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            debug!(error = %e, marker = BASE_SNAP_MARKER, "cannot probe base snap marker");
            false
        }
    }
}

/// Determine the authoritative snap mount directory below `root`
///
/// # Errors
///
/// Returns an error if `/snap` cannot be inspected, is a symlink to anything
/// other than the alternate location, or is neither a directory nor a
/// symlink.
pub fn probe_snap_mount_dir(
    root: &Path,
    fs: &dyn FilesystemProbe,
    release: &dyn ReleaseInfo,
) -> Result<PathBuf, MountDirError> {
    let default_dir = join_under(root, DEFAULT_SNAP_MOUNT_DIR);
    let alt_dir = join_under(root, ALT_SNAP_MOUNT_DIR);

    if release.distro_like(SPECIAL_DEFAULT_DIR_DISTROS) {
        return Ok(default_dir);
    }

    match fs.lstat(&default_dir) {
        // Unknown distribution whose packaging has no /snap at all
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(alt_dir),
        Err(e) => Err(MountDirError::Stat {
            path: default_dir.display().to_string(),
            message: e.to_string(),
        }),
        Ok(FileKind::Symlink) => {
            // Read rather than resolve: intermediate directories of the
            // target may not exist yet. Relative targets are accepted too.
            let target = fs
                .read_link(&default_dir)
                .map_err(|e| MountDirError::ReadLink {
                    path: default_dir.display().to_string(),
                    message: e.to_string(),
                })?;
            if is_alt_mount_dir_target(target.as_os_str(), &alt_dir) {
                Ok(alt_dir)
            } else {
                Err(MountDirError::BadSymlink {
                    path: default_dir.display().to_string(),
                    expected: ALT_SNAP_MOUNT_DIR.to_string(),
                })
            }
        }
        Ok(FileKind::Directory) => Ok(default_dir),
        Ok(FileKind::File | FileKind::Other) => Err(MountDirError::Unresolved),
    }
}

fn is_alt_mount_dir_target(target: &OsStr, alt_dir: &Path) -> bool {
    target == OsStr::new(ALT_SNAP_MOUNT_DIR)
        || target == OsStr::new(&ALT_SNAP_MOUNT_DIR[1..])
        || target == alt_dir.as_os_str()
}

/// Resolve the mount directory for `root`, never failing
///
/// Inside a base snap the default location is forced. Otherwise the probe
/// runs and any failure is kept in the outcome.
#[must_use]
pub fn resolve_snap_mount_dir(
    root: &Path,
    platform: &Platform,
    release: &dyn ReleaseInfo,
) -> MountDirOutcome {
    if is_inside_base_snap(platform.filesystem()) {
        return MountDirOutcome::Resolved(join_under(root, DEFAULT_SNAP_MOUNT_DIR));
    }

    match probe_snap_mount_dir(root, platform.filesystem(), release) {
        Ok(dir) => {
            debug!(root = %root.display(), mount_dir = %dir.display(), "resolved snap mount dir");
            MountDirOutcome::Resolved(dir)
        }
        Err(e) => {
            warn!(root = %root.display(), error = %e, "cannot resolve snap mount directory");
            MountDirOutcome::Unresolved(DirsError::from(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapd_platform::HostFilesystem;
    use snapd_release::FixedRelease;
    use std::fs;
    use std::os::unix::fs::symlink;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn ubuntu() -> FixedRelease {
        FixedRelease::classic("ubuntu").like("debian")
    }

    fn probe(root: &Path) -> Result<PathBuf, MountDirError> {
        probe_snap_mount_dir(root, &HostFilesystem::new(), &ubuntu())
    }

    #[test]
    fn test_directory_is_default() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("snap")).unwrap();
        assert_eq!(probe(temp.path()).unwrap(), temp.path().join("snap"));
    }

    #[test]
    fn test_missing_is_alternate() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            probe(temp.path()).unwrap(),
            temp.path().join("var/lib/snapd/snap")
        );
    }

    #[test]
    fn test_symlink_target_forms() {
        for form in ["absolute", "relative", "rooted"] {
            let temp = TempDir::new().unwrap();
            let alt = temp.path().join("var/lib/snapd/snap");
            let target = match form {
                "absolute" => PathBuf::from("/var/lib/snapd/snap"),
                "relative" => PathBuf::from("var/lib/snapd/snap"),
                _ => alt.clone(),
            };
            symlink(&target, temp.path().join("snap")).unwrap();
            assert_eq!(probe(temp.path()).unwrap(), alt, "{form}");
        }
    }

    #[test]
    fn test_symlink_elsewhere_fails() {
        let temp = TempDir::new().unwrap();
        symlink("/opt/snaps", temp.path().join("snap")).unwrap();
        let err = probe(temp.path()).unwrap_err();
        assert!(matches!(err, MountDirError::BadSymlink { .. }));
        assert!(err.to_string().ends_with("must be a symbolic link to /var/lib/snapd/snap"));
    }

    #[test]
    fn test_regular_file_is_unresolved() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("snap"), b"").unwrap();
        assert_eq!(probe(temp.path()).unwrap_err(), MountDirError::Unresolved);
    }

    #[test]
    fn test_special_distro_skips_probe() {
        let temp = TempDir::new().unwrap();
        let release = FixedRelease::classic("ubuntucoreinitramfs");
        let dir = probe_snap_mount_dir(temp.path(), &HostFilesystem::new(), &release).unwrap();
        assert_eq!(dir, temp.path().join("snap"));
    }

    #[test]
    fn test_outcome_placeholder() {
        let temp = TempDir::new().unwrap();
        symlink("/elsewhere", temp.path().join("snap")).unwrap();
        let platform = Platform::new(Arc::new(HostFilesystem::new()));
        let outcome = resolve_snap_mount_dir(temp.path(), &platform, &ubuntu());
        assert_eq!(outcome.path(), Path::new(SNAP_MOUNT_DIR_UNRESOLVED_PLACEHOLDER));
        assert!(outcome
            .error()
            .unwrap()
            .to_string()
            .starts_with("cannot resolve snap mount directory: "));
    }
}
