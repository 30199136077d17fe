#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Filesystem layout of the snapd daemon
//!
//! [`Dirs`] is the single source of truth for where the daemon reads and
//! writes: sockets, state files, caches, security policy directories and
//! per-user data globs. Every location is derived from one global root,
//! normally `/`, which can be moved for chroot work, image building and tests.
//!
//! Changing the root re-derives everything:
//! 1. the snap mount directory is probed (see [`mount`])
//! 2. the [`PathTable`] is recomputed
//! 3. the home directory set is reset to `root/home`
//! 4. registered callbacks run in order
//!
//! Root changes take `&mut self` and are expected to be rare. The home
//! directory set carries its own lock and can be updated through a shared
//! reference at any time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use snapd_config::Config;
use snapd_errors::{DirsError, Error};
use snapd_platform::{FileKind, Platform};
use snapd_release::ReleaseInfo;
use tracing::{debug, info};

pub mod callbacks;
pub mod constants;
pub mod home;
pub mod mount;
pub mod table;
pub mod under;
pub mod util;

pub use callbacks::{RootChangeCallback, RootChangeCallbacks};
pub use constants::*;
pub use home::{HomeDirs, HomeDirsSnapshot, SnapDirOptions};
pub use mount::MountDirOutcome;
pub use table::PathTable;
pub use under::*;

/// The directory layout for one global root
pub struct Dirs {
    root: PathBuf,
    mount_dir: MountDirOutcome,
    paths: PathTable,
    home_dirs: HomeDirs,
    callbacks: RootChangeCallbacks,
    platform: Platform,
    release: Arc<dyn ReleaseInfo>,
}

impl Dirs {
    /// Resolve the layout below `root`
    #[must_use]
    pub fn new(root: impl AsRef<Path>, platform: Platform, release: Arc<dyn ReleaseInfo>) -> Self {
        let mut dirs = Self {
            root: PathBuf::from("/"),
            mount_dir: MountDirOutcome::Resolved(PathBuf::from(DEFAULT_SNAP_MOUNT_DIR)),
            paths: PathTable::default(),
            home_dirs: HomeDirs::default(),
            callbacks: RootChangeCallbacks::new(),
            platform,
            release,
        };
        dirs.set_root(root);
        dirs
    }

    /// Resolve the layout below the root named by `SNAPPY_GLOBAL_ROOT`, or `/`
    ///
    /// # Errors
    ///
    /// Returns an error if the environment carries an invalid root override.
    pub fn from_env(platform: Platform, release: Arc<dyn ReleaseInfo>) -> Result<Self, Error> {
        let mut config = Config::default();
        config.merge_env()?;
        Ok(Self::new(config.root_dir(), platform, release))
    }

    /// Resolve the layout from loaded configuration
    ///
    /// A non-empty home directory list in `config` replaces the default set.
    #[must_use]
    pub fn from_config(config: &Config, platform: Platform, release: Arc<dyn ReleaseInfo>) -> Self {
        let dirs = Self::new(config.root_dir(), platform, release);
        if !config.homedirs.homedirs.is_empty() {
            dirs.set_home_dirs(&config.homedirs.homedirs);
        }
        dirs
    }

    /// Move the global root and re-derive every location
    ///
    /// An empty path means `/`. Mount directory detection failures do not
    /// abort the change; they are available from
    /// [`Dirs::mount_dir_detection_error`] afterwards. Registered callbacks
    /// run last, in registration order, and see the new table.
    pub fn set_root(&mut self, root: impl AsRef<Path>) {
        let root = root.as_ref();
        let root = if root.as_os_str().is_empty() {
            PathBuf::from("/")
        } else {
            root.to_path_buf()
        };
        debug!(root = %root.display(), "setting global root directory");

        self.mount_dir = mount::resolve_snap_mount_dir(&root, &self.platform, &*self.release);
        self.paths = PathTable::compute(
            &root,
            self.mount_dir.path(),
            self.platform.filesystem(),
            &*self.release,
        );
        self.home_dirs.set(&root, "");
        self.root = root;

        self.callbacks.notify(&self.root, &self.paths);

        info!(
            root = %self.root.display(),
            snap_mount_dir = %self.paths.snap_mount_dir.display(),
            callbacks = self.callbacks.len(),
            "directory layout resolved"
        );
    }

    /// The global root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Strip the global root from `path`
    ///
    /// # Panics
    ///
    /// Panics if `path` is not absolute or not below the global root.
    #[must_use]
    pub fn strip_root(&self, path: impl AsRef<Path>) -> PathBuf {
        util::strip_root(path.as_ref(), &self.root)
    }

    /// Every derived location
    #[must_use]
    pub fn paths(&self) -> &PathTable {
        &self.paths
    }

    /// The snap mount directory, or the unresolved placeholder
    #[must_use]
    pub fn snap_mount_dir(&self) -> &Path {
        self.mount_dir.path()
    }

    /// Why the snap mount directory could not be determined, if it could not
    ///
    /// Callers relying on [`PathTable::snap_mount_dir`] or anything below it
    /// must check this first.
    #[must_use]
    pub fn mount_dir_detection_error(&self) -> Option<&DirsError> {
        self.mount_dir.error()
    }

    /// Replace the home directory set from a comma separated list
    #[allow(clippy::must_use_candidate)]
    pub fn set_home_dirs(&self, homedirs: &str) -> Vec<PathBuf> {
        self.home_dirs.set(&self.root, homedirs)
    }

    /// Configured home directories, never empty
    #[must_use]
    pub fn home_dirs(&self) -> Vec<PathBuf> {
        self.home_dirs.get()
    }

    /// Per-user data globs for the layout chosen by `opts`
    #[must_use]
    pub fn data_home_globs(&self, opts: Option<&SnapDirOptions>) -> Vec<PathBuf> {
        self.home_dirs.data_home_globs(opts)
    }

    /// Register a subscriber for root changes
    ///
    /// The subscriber must not change the root itself.
    pub fn register_root_change_callback<F>(&mut self, callback: F)
    where
        F: Fn(&Path, &PathTable) + Send + Sync + 'static,
    {
        self.callbacks.register(Box::new(callback));
    }

    /// Whether the layout allows classic confinement
    ///
    /// Never on core. On classic, only when snaps are mounted at `/snap`, or
    /// `/snap` is a symlink resolving to the mount directory.
    #[must_use]
    pub fn supports_classic_confinement(&self) -> bool {
        if !self.release.on_classic() {
            return false;
        }

        let smd = util::join_under(&self.root, DEFAULT_SNAP_MOUNT_DIR);
        if self.paths.snap_mount_dir == smd {
            return true;
        }

        let fs = self.platform.filesystem();
        matches!(fs.lstat(&smd), Ok(FileKind::Symlink))
            && fs
                .canonicalize(&smd)
                .is_ok_and(|target| target == self.paths.snap_mount_dir)
    }

    /// Where `/usr/lib/snapd` of a snap with `base` comes from, seen from
    /// outside the snap
    ///
    /// Without a base it is the core snap's. With one, the snapd snap's when
    /// installed, the distribution's otherwise.
    #[must_use]
    pub fn lib_exec_outside(&self, base: &str) -> PathBuf {
        let mount_dir = &self.paths.snap_mount_dir;
        if base.is_empty() {
            return util::join_under(mount_dir, "core/current/usr/lib/snapd");
        }
        let snapd = util::join_under(mount_dir, "snapd/current/usr/lib/snapd");
        if self.platform.is_dir(&snapd) {
            return snapd;
        }
        self.paths.distro_libexec_dir.clone()
    }

    /// The bash completion helper used for snaps with `base`
    #[must_use]
    pub fn complete_sh_path(&self, base: &str) -> PathBuf {
        self.lib_exec_outside(base).join("complete.sh")
    }

    /// Whether `path` is a symlink to some `.../snapd/complete.sh`
    #[must_use]
    pub fn is_complete_sh_symlink(&self, path: impl AsRef<Path>) -> bool {
        let Ok(target) = self.platform.filesystem().read_link(path.as_ref()) else {
            return false;
        };
        target.file_name().is_some_and(|name| name == "complete.sh")
            && target
                .parent()
                .and_then(Path::file_name)
                .is_some_and(|name| name == "snapd")
    }
}

impl std::fmt::Debug for Dirs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dirs")
            .field("root", &self.root)
            .field("mount_dir", &self.mount_dir)
            .field("home_dirs", &self.home_dirs)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}
