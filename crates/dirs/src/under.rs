//! Locations below an arbitrary root
//!
//! Unlike [`crate::PathTable`] these do not honor the global root; callers
//! pass the root they care about, e.g. a seed image being assembled.

use std::path::{Path, PathBuf};

use crate::constants::SNAPPY_DIR;
use crate::util::join_under;

fn snappy_under(rootdir: &Path, rel: &str) -> PathBuf {
    join_under(&join_under(rootdir, SNAPPY_DIR), rel)
}

/// `/var/lib/snapd` under `rootdir`
#[must_use]
pub fn snapd_state_dir(rootdir: &Path) -> PathBuf {
    join_under(rootdir, SNAPPY_DIR)
}

#[must_use]
pub fn snap_blob_dir_under(rootdir: &Path) -> PathBuf {
    snappy_under(rootdir, "snaps")
}

#[must_use]
pub fn snap_seed_dir_under(rootdir: &Path) -> PathBuf {
    snappy_under(rootdir, "seed")
}

#[must_use]
pub fn snap_state_file_under(rootdir: &Path) -> PathBuf {
    snappy_under(rootdir, "state.json")
}

#[must_use]
pub fn snap_state_lock_file_under(rootdir: &Path) -> PathBuf {
    snappy_under(rootdir, "state.lock")
}

#[must_use]
pub fn snap_modeenv_file_under(rootdir: &Path) -> PathBuf {
    snappy_under(rootdir, "modeenv")
}

#[must_use]
pub fn features_dir_under(rootdir: &Path) -> PathBuf {
    snappy_under(rootdir, "features")
}

#[must_use]
pub fn snap_system_params_under(rootdir: &Path) -> PathBuf {
    snappy_under(rootdir, "system-params")
}

#[must_use]
pub fn snap_systemd_conf_dir_under(rootdir: &Path) -> PathBuf {
    join_under(rootdir, "/etc/systemd/system.conf.d")
}

/// Systemd system unit directory under `rootdir`
#[must_use]
pub fn snap_services_dir_under(rootdir: &Path) -> PathBuf {
    join_under(rootdir, "/etc/systemd/system")
}

/// Transient units, cleared on reboot
#[must_use]
pub fn snap_runtime_services_dir_under(rootdir: &Path) -> PathBuf {
    join_under(rootdir, "/run/systemd/system")
}

#[must_use]
pub fn snap_systemd_dir_under(rootdir: &Path) -> PathBuf {
    join_under(rootdir, "/etc/systemd")
}

#[must_use]
pub fn snap_boot_assets_dir_under(rootdir: &Path) -> PathBuf {
    snappy_under(rootdir, "boot-assets")
}

#[must_use]
pub fn snap_device_dir_under(rootdir: &Path) -> PathBuf {
    snappy_under(rootdir, "device")
}

/// Full disk encryption state under `rootdir`
#[must_use]
pub fn snap_fde_dir_under(rootdir: &Path) -> PathBuf {
    join_under(&snap_device_dir_under(rootdir), "fde")
}

#[must_use]
pub fn snap_save_dir_under(rootdir: &Path) -> PathBuf {
    snappy_under(rootdir, "save")
}

/// Full disk encryption state inside an already located save tree
#[must_use]
pub fn snap_fde_dir_under_save(savedir: &Path) -> PathBuf {
    join_under(savedir, "device/fde")
}

#[must_use]
pub fn snap_repair_config_file_under(rootdir: &Path) -> PathBuf {
    snappy_under(rootdir, "repair.json")
}

/// Kernel driver trees extracted from kernel snaps
#[must_use]
pub fn snap_kernel_drivers_trees_dir_under(rootdir: &Path) -> PathBuf {
    snappy_under(rootdir, "kernel")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_helpers() {
        let root = Path::new("/tmp/image");
        assert_eq!(snapd_state_dir(root), PathBuf::from("/tmp/image/var/lib/snapd"));
        assert_eq!(
            snap_state_file_under(root),
            PathBuf::from("/tmp/image/var/lib/snapd/state.json")
        );
        assert_eq!(
            snap_fde_dir_under(root),
            PathBuf::from("/tmp/image/var/lib/snapd/device/fde")
        );
        assert_eq!(
            snap_fde_dir_under_save(Path::new("/run/mnt/ubuntu-save")),
            PathBuf::from("/run/mnt/ubuntu-save/device/fde")
        );
        assert_eq!(
            snap_runtime_services_dir_under(Path::new("/")),
            PathBuf::from("/run/systemd/system")
        );
    }
}
