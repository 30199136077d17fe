//! Fixed locations and names of the snapd directory layout
//!
//! Everything in here is relative to the global root unless noted otherwise.

pub const DEFAULT_SNAP_MOUNT_DIR: &str = "/snap";
pub const ALT_SNAP_MOUNT_DIR: &str = "/var/lib/snapd/snap";

/// Libexec dir used on most distributions
pub const DEFAULT_DISTRO_LIBEXEC_DIR: &str = "/usr/lib/snapd";
/// Libexec dir used by Fedora and friends
pub const ALT_DISTRO_LIBEXEC_DIR: &str = "/usr/libexec/snapd";

// Static inside the core snap, never prefixed with the global root since
// they are always absolute once inside the confinement environment.
pub const CORE_LIBEXEC_DIR: &str = "/usr/lib/snapd";
pub const CORE_SNAP_MOUNT_DIR: &str = "/snap";

/// Directory with snap data inside a user's home
pub const USER_HOME_SNAP_DIR: &str = "snap";

/// Hidden variant of [`USER_HOME_SNAP_DIR`]
pub const HIDDEN_SNAP_DATA_HOME_DIR: &str = ".snap/data";

/// Where snaps place user-facing data once `~/snap` moved to `~/.snap`
pub const EXPOSED_SNAP_HOME_DIR: &str = "Snap";

/// Prefix of spooled local install blobs inside the blob dir
pub const LOCAL_INSTALL_BLOB_TEMP_PREFIX: &str = ".local-install-";

/// State directory, joined under a root
pub const SNAPPY_DIR: &str = "var/lib/snapd";

/// Marker present when running inside a base snap mounted at `/`.
/// Host absolute, never joined with the global root.
pub const BASE_SNAP_MARKER: &str = "/meta/snap.yaml";

/// Distributions that use `/snap` but are packaged in a way the probe
/// cannot detect
pub const SPECIAL_DEFAULT_DIR_DISTROS: &[&str] = &["ubuntucoreinitramfs"];

/// Published as the mount dir when it cannot be determined; no filesystem
/// operation can succeed on it
pub const SNAP_MOUNT_DIR_UNRESOLVED_PLACEHOLDER: &str = "mount-dir-is-unset";
