//! Platform abstraction layer for read-only host probes.
//!
//! This crate provides a unified interface for the handful of filesystem
//! queries the directory layout code needs:
//! - `lstat` style inspection that does not follow symlinks
//! - `stat` style inspection that does
//! - reading and fully resolving symlinks
//!
//! Nothing in here mutates the filesystem. Probes are synchronous and local.

pub mod core;
pub mod filesystem;
pub mod implementations;

pub use crate::core::Platform;
pub use implementations::host::HostFilesystem;

/// Re-export commonly used types
pub use filesystem::{FileKind, FilesystemProbe};
