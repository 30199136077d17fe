//! Core platform handle

use std::path::Path;
use std::sync::Arc;

use crate::filesystem::FilesystemProbe;
use crate::implementations::host::HostFilesystem;

/// Main platform abstraction providing access to host probes
///
/// The handle is cheap to clone; every clone shares the same probe
/// implementation.
#[derive(Clone)]
pub struct Platform {
    filesystem_ops: Arc<dyn FilesystemProbe>,
}

impl Platform {
    /// Create a new platform instance with the specified implementation
    #[must_use]
    pub fn new(filesystem_ops: Arc<dyn FilesystemProbe>) -> Self {
        Self { filesystem_ops }
    }

    /// Get the platform backed by the running host
    #[must_use]
    pub fn current() -> Self {
        Self::new(Arc::new(HostFilesystem::new()))
    }

    /// Access filesystem probes
    #[must_use]
    pub fn filesystem(&self) -> &dyn FilesystemProbe {
        &*self.filesystem_ops
    }

    /// Convenience method: check whether a path exists
    #[must_use]
    pub fn exists(&self, path: &Path) -> bool {
        self.filesystem().exists(path)
    }

    /// Convenience method: check whether a path is a directory
    #[must_use]
    pub fn is_dir(&self, path: &Path) -> bool {
        self.filesystem().is_dir(path)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform").finish_non_exhaustive()
    }
}
