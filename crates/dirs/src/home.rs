//! User home directories and the per-user data globs derived from them
//!
//! The set is replaced wholesale: a writer builds a fresh [`HomeDirsSnapshot`]
//! and swaps it in under the lock, so a reader sees either the old or the new
//! set, never a mix.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::constants::{HIDDEN_SNAP_DATA_HOME_DIR, USER_HOME_SNAP_DIR};
use crate::util::{clean_path, is_under_root, join_under};

/// Selects how snap data is laid out inside a user's home
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapDirOptions {
    /// Data lives in `~/.snap/data` instead of `~/snap`
    pub hidden_snap_data_dir: bool,

    /// `~/Snap` has been initialized with the contents of the snap's
    /// previous revisioned home
    pub migrated_to_exposed_home: bool,
}

/// One consistent generation of the home directory set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeDirsSnapshot {
    root: PathBuf,
    dirs: Vec<PathBuf>,
    data_globs: Vec<PathBuf>,
    hidden_data_globs: Vec<PathBuf>,
}

impl HomeDirsSnapshot {
    /// Build the set for `root` from a comma separated list
    ///
    /// Entries are cleaned and re-rooted when not already below `root`.
    /// `root/home` is appended unless present. An empty list yields just
    /// `root/home`.
    #[must_use]
    pub fn parse(root: &Path, homedirs: &str) -> Self {
        let default_home = join_under(root, "/home");
        let mut dirs: Vec<PathBuf> = Vec::new();

        if !homedirs.is_empty() {
            for entry in homedirs.split(',') {
                let cleaned = clean_path(Path::new(entry));
                if is_strictly_below(&cleaned, root) {
                    dirs.push(cleaned);
                } else {
                    dirs.push(join_under(root, &cleaned));
                }
            }
        }

        if !dirs.contains(&default_home) {
            dirs.push(default_home);
        }

        let data_globs = dirs
            .iter()
            .map(|dir| join_under(dir, Path::new("*").join(USER_HOME_SNAP_DIR)))
            .collect();
        let hidden_data_globs = dirs
            .iter()
            .map(|dir| join_under(dir, Path::new("*").join(HIDDEN_SNAP_DATA_HOME_DIR)))
            .collect();

        Self {
            root: root.to_path_buf(),
            dirs,
            data_globs,
            hidden_data_globs,
        }
    }

    /// Home directories, never empty
    #[must_use]
    pub fn dirs(&self) -> Vec<PathBuf> {
        if self.dirs.is_empty() {
            return vec![join_under(&self.root, "/home")];
        }
        self.dirs.clone()
    }

    /// Data globs for the layout chosen by `opts`, one per home directory
    #[must_use]
    pub fn data_home_globs(&self, opts: Option<&SnapDirOptions>) -> &[PathBuf] {
        match opts {
            Some(opts) if opts.hidden_snap_data_dir => &self.hidden_data_globs,
            _ => &self.data_globs,
        }
    }
}

// `/x/home` is below `/x`, `/x` and `/xy` are not. Everything absolute is
// below `/`.
fn is_strictly_below(path: &Path, root: &Path) -> bool {
    let root = clean_path(root);
    is_under_root(path, &root) && (root == Path::new("/") || clean_path(path) != root)
}

/// Thread-safe home directory set
#[derive(Debug, Default)]
pub struct HomeDirs {
    current: Mutex<Arc<HomeDirsSnapshot>>,
}

impl HomeDirs {
    /// Set containing only `root/home`
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            current: Mutex::new(Arc::new(HomeDirsSnapshot::parse(root, ""))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Arc<HomeDirsSnapshot>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the set from a comma separated list, returning the new
    /// directories
    #[allow(clippy::must_use_candidate)]
    pub fn set(&self, root: &Path, homedirs: &str) -> Vec<PathBuf> {
        let snapshot = Arc::new(HomeDirsSnapshot::parse(root, homedirs));
        let dirs = snapshot.dirs();
        *self.lock() = snapshot;
        debug!(homedirs = ?dirs, "home directories updated");
        dirs
    }

    /// Current home directories, never empty
    #[must_use]
    pub fn get(&self) -> Vec<PathBuf> {
        self.lock().dirs()
    }

    /// Current data globs for the layout chosen by `opts`
    #[must_use]
    pub fn data_home_globs(&self, opts: Option<&SnapDirOptions>) -> Vec<PathBuf> {
        self.lock().data_home_globs(opts).to_vec()
    }

    /// The current generation, for callers needing dirs and globs together
    #[must_use]
    pub fn snapshot(&self) -> Arc<HomeDirsSnapshot> {
        Arc::clone(&self.lock())
    }
}
