//! Every location derived from the global root
//!
//! A [`PathTable`] is a snapshot: it is computed in one go from the root,
//! the resolved mount directory and the environment, and replaced wholesale
//! on the next root change. Nothing in it is independently settable.

use std::io;
use std::path::{Path, PathBuf};

use snapd_platform::FilesystemProbe;
use snapd_release::ReleaseInfo;

use crate::constants::{
    ALT_DISTRO_LIBEXEC_DIR, CORE_LIBEXEC_DIR, DEFAULT_DISTRO_LIBEXEC_DIR, SNAPPY_DIR,
};
use crate::under;
use crate::util::join_under;

/// Derived locations for one root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTable {
    pub run_dir: PathBuf,

    /// Where snaps are mounted; the unresolved placeholder when detection failed
    pub snap_mount_dir: PathBuf,
    pub distro_libexec_dir: PathBuf,

    pub snap_blob_dir: PathBuf,
    pub snap_data_dir: PathBuf,
    pub snap_download_cache_dir: PathBuf,
    pub snap_apparmor_dir: PathBuf,
    pub snap_ldconfig_dir: PathBuf,
    pub snap_seccomp_base: PathBuf,
    pub snap_seccomp_dir: PathBuf,
    pub snap_mount_policy_dir: PathBuf,
    pub snap_cgroup_policy_dir: PathBuf,
    pub snap_udev_rules_dir: PathBuf,
    pub snap_kmod_modules_dir: PathBuf,
    pub snap_kmod_modprobe_dir: PathBuf,
    pub locale_dir: PathBuf,
    pub snapd_socket: PathBuf,
    pub snap_socket: PathBuf,
    pub snap_run_dir: PathBuf,
    pub snap_run_ns_dir: PathBuf,
    pub snap_run_lock_dir: PathBuf,
    pub snap_bootstrap_run_dir: PathBuf,
    pub snap_void_dir: PathBuf,

    pub snap_interfaces_requests_run_dir: PathBuf,
    pub snap_interfaces_requests_state_dir: PathBuf,

    pub snapd_maintenance_file: PathBuf,
    pub snapd_store_ssl_certs_dir: PathBuf,

    pub snap_seed_dir: PathBuf,
    pub snap_device_dir: PathBuf,

    pub snap_asserts_db_dir: PathBuf,
    pub snap_cookie_dir: PathBuf,
    pub snap_asserts_spool_dir: PathBuf,
    pub snap_seq_dir: PathBuf,

    pub snap_state_file: PathBuf,
    pub snap_state_lock_file: PathBuf,
    pub snap_system_key_file: PathBuf,

    pub snap_repair_config_file: PathBuf,
    pub snap_repair_dir: PathBuf,
    pub snap_repair_state_file: PathBuf,
    pub snap_repair_run_dir: PathBuf,
    pub snap_repair_asserts_dir: PathBuf,
    pub snap_run_repair_dir: PathBuf,

    pub snap_rollback_dir: PathBuf,

    pub snap_cache_dir: PathBuf,
    pub snap_names_file: PathBuf,
    pub snap_sections_file: PathBuf,
    pub snap_commands_db: PathBuf,
    pub snap_aux_store_info_dir: PathBuf,
    pub snap_icons_pool_dir: PathBuf,
    pub snap_icons_dir: PathBuf,

    pub snap_binaries_dir: PathBuf,
    pub snap_services_dir: PathBuf,
    pub snap_runtime_services_dir: PathBuf,
    pub snap_user_services_dir: PathBuf,
    pub snap_systemd_conf_dir: PathBuf,
    pub snap_desktop_files_dir: PathBuf,
    pub snap_desktop_icons_dir: PathBuf,
    pub snap_polkit_policy_dir: PathBuf,
    pub snap_polkit_rule_dir: PathBuf,
    pub snap_systemd_dir: PathBuf,
    pub snap_systemd_run_dir: PathBuf,

    pub snap_dbus_session_policy_dir: PathBuf,
    pub snap_dbus_system_policy_dir: PathBuf,
    pub snap_dbus_session_services_dir: PathBuf,
    pub snap_dbus_system_services_dir: PathBuf,

    pub snap_modeenv_file: PathBuf,
    pub snap_boot_assets_dir: PathBuf,
    pub snap_fde_dir: PathBuf,
    pub snap_save_dir: PathBuf,
    pub snap_device_save_dir: PathBuf,
    pub snap_data_save_dir: PathBuf,

    pub snap_gpio_chardev_dir: PathBuf,

    pub cloud_instance_data_file: PathBuf,

    pub classic_dir: PathBuf,

    pub xdg_runtime_dir_base: PathBuf,
    pub xdg_runtime_dir_glob: PathBuf,

    /// Inside the core snap, never root-prefixed
    pub completion_helper_in_core: PathBuf,
    pub bash_completion_script: PathBuf,
    pub legacy_completers_dir: PathBuf,
    pub completers_dir: PathBuf,

    pub system_fonts_dir: PathBuf,
    pub system_local_fonts_dir: PathBuf,
    pub system_fontconfig_cache_dirs: Vec<PathBuf>,

    pub snapshots_dir: PathBuf,

    pub sysfs_dir: PathBuf,

    pub dev_dir: PathBuf,

    pub features_dir: PathBuf,

    /// Where writable root data is mounted: the root itself on classic,
    /// `/writable` below it on core
    pub writable_mount_path: PathBuf,

    /// `/writable/system-data` on core; points at a non-existing dir on classic
    pub writable_ubuntu_core_system_data_dir: PathBuf,
}

impl PathTable {
    /// Derive every location for `root`
    ///
    /// The only filesystem access is a `stat` of the default libexec
    /// directory (and of the alternate one when the default is missing).
    #[must_use]
    pub fn compute(
        root: &Path,
        snap_mount_dir: &Path,
        fs: &dyn FilesystemProbe,
        release: &dyn ReleaseInfo,
    ) -> Self {
        let snappy = |rel: &str| join_under(&join_under(root, SNAPPY_DIR), rel);
        let at = |rel: &str| join_under(root, rel);

        let snap_seccomp_base = snappy("seccomp");
        let snap_run_dir = at("/run/snapd");
        let snap_cache_dir = at("/var/cache/snapd");
        let snap_repair_dir = snappy("repair");
        let snap_save_dir = under::snap_save_dir_under(root);
        let dev_dir = at("/dev");
        let xdg_runtime_dir_base = at("/run/user");

        let writable_mount_path = if release.on_classic() {
            root.to_path_buf()
        } else {
            at("writable")
        };

        Self {
            run_dir: at("/run"),
            snap_mount_dir: snap_mount_dir.to_path_buf(),
            distro_libexec_dir: distro_libexec_dir(root, fs),

            snap_blob_dir: under::snap_blob_dir_under(root),
            snap_data_dir: at("/var/snap"),
            snap_download_cache_dir: snappy("cache"),
            snap_apparmor_dir: snappy("apparmor/profiles"),
            snap_ldconfig_dir: at("/etc/ld.so.conf.d"),
            snap_seccomp_dir: join_under(&snap_seccomp_base, "bpf"),
            snap_seccomp_base,
            snap_mount_policy_dir: snappy("mount"),
            snap_cgroup_policy_dir: snappy("cgroup"),
            snap_udev_rules_dir: at("/etc/udev/rules.d"),
            snap_kmod_modules_dir: at("/etc/modules-load.d/"),
            snap_kmod_modprobe_dir: at("/etc/modprobe.d/"),
            locale_dir: at("/usr/share/locale"),
            // keep in sync with the snapd.socket unit
            snapd_socket: at("/run/snapd.socket"),
            snap_socket: at("/run/snapd-snap.socket"),
            snap_run_dir: snap_run_dir.clone(),
            snap_run_ns_dir: join_under(&snap_run_dir, "/ns"),
            snap_run_lock_dir: join_under(&snap_run_dir, "/lock"),
            snap_bootstrap_run_dir: join_under(&snap_run_dir, "snap-bootstrap"),
            snap_void_dir: snappy("void"),

            snap_interfaces_requests_run_dir: join_under(&snap_run_dir, "interfaces-requests"),
            snap_interfaces_requests_state_dir: snappy("interfaces-requests"),

            snapd_maintenance_file: snappy("maintenance.json"),
            snapd_store_ssl_certs_dir: snappy("ssl/store-certs"),

            snap_seed_dir: under::snap_seed_dir_under(root),
            snap_device_dir: under::snap_device_dir_under(root),

            snap_asserts_db_dir: snappy("assertions"),
            snap_cookie_dir: snappy("cookie"),
            snap_asserts_spool_dir: at("run/snapd/auto-import"),
            snap_seq_dir: snappy("sequence"),

            snap_state_file: under::snap_state_file_under(root),
            snap_state_lock_file: under::snap_state_lock_file_under(root),
            snap_system_key_file: snappy("system-key"),

            snap_repair_config_file: under::snap_repair_config_file_under(root),
            snap_repair_state_file: join_under(&snap_repair_dir, "repair.json"),
            snap_repair_run_dir: join_under(&snap_repair_dir, "run"),
            snap_repair_asserts_dir: join_under(&snap_repair_dir, "assertions"),
            snap_repair_dir,
            snap_run_repair_dir: join_under(&snap_run_dir, "repair"),

            snap_rollback_dir: snappy("rollback"),

            snap_names_file: join_under(&snap_cache_dir, "names"),
            snap_sections_file: join_under(&snap_cache_dir, "sections"),
            snap_commands_db: join_under(&snap_cache_dir, "commands.db"),
            snap_aux_store_info_dir: join_under(&snap_cache_dir, "aux"),
            snap_icons_pool_dir: join_under(&snap_cache_dir, "icons-pool"),
            snap_icons_dir: join_under(&snap_cache_dir, "icons"),
            snap_cache_dir,

            snap_binaries_dir: join_under(snap_mount_dir, "bin"),
            snap_services_dir: under::snap_services_dir_under(root),
            snap_runtime_services_dir: under::snap_runtime_services_dir_under(root),
            snap_user_services_dir: at("/etc/systemd/user"),
            snap_systemd_conf_dir: under::snap_systemd_conf_dir_under(root),
            // Added to $XDG_DATA_DIRS; subdirectories follow the
            // freedesktop.org layout
            snap_desktop_files_dir: snappy("desktop/applications"),
            snap_desktop_icons_dir: snappy("desktop/icons"),
            snap_polkit_policy_dir: at("/usr/share/polkit-1/actions"),
            snap_polkit_rule_dir: at("/etc/polkit-1/rules.d"),
            snap_systemd_dir: under::snap_systemd_dir_under(root),
            snap_systemd_run_dir: at("/run/systemd"),

            snap_dbus_system_policy_dir: at("/etc/dbus-1/system.d"),
            snap_dbus_session_policy_dir: at("/etc/dbus-1/session.d"),
            // mirrors the /usr/share/dbus-1 hierarchy
            snap_dbus_session_services_dir: snappy("dbus-1/services"),
            snap_dbus_system_services_dir: snappy("dbus-1/system-services"),

            snap_modeenv_file: under::snap_modeenv_file_under(root),
            snap_boot_assets_dir: under::snap_boot_assets_dir_under(root),
            snap_fde_dir: under::snap_fde_dir_under(root),
            snap_device_save_dir: join_under(&snap_save_dir, "device"),
            snap_data_save_dir: join_under(&snap_save_dir, "snap"),
            snap_save_dir,

            snap_gpio_chardev_dir: join_under(&dev_dir, "/snap/gpio-chardev"),

            cloud_instance_data_file: at("/run/cloud-init/instance-data.json"),

            classic_dir: at("/writable/classic"),

            xdg_runtime_dir_glob: join_under(&xdg_runtime_dir_base, "*/"),
            xdg_runtime_dir_base,

            completion_helper_in_core: join_under(Path::new(CORE_LIBEXEC_DIR), "etelpmoc.sh"),
            bash_completion_script: at("/usr/share/bash-completion/bash_completion"),
            legacy_completers_dir: at("/usr/share/bash-completion/completions/"),
            completers_dir: snappy("desktop/bash-completion/completions/"),

            // these agree across all supported distros
            system_fonts_dir: at("/usr/share/fonts"),
            system_local_fonts_dir: at("/usr/local/share/fonts"),
            system_fontconfig_cache_dirs: fontconfig_cache_dirs(root, release),

            snapshots_dir: snappy("snapshots"),

            sysfs_dir: at("/sys"),

            dev_dir,

            features_dir: under::features_dir_under(root),

            writable_ubuntu_core_system_data_dir: join_under(&writable_mount_path, "system-data"),
            writable_mount_path,
        }
    }
}

/// `/usr/lib/snapd`, unless it is missing and `/usr/libexec/snapd` exists
fn distro_libexec_dir(root: &Path, fs: &dyn FilesystemProbe) -> PathBuf {
    let default_dir = join_under(root, DEFAULT_DISTRO_LIBEXEC_DIR);
    match fs.stat(&default_dir) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let alt = join_under(root, ALT_DISTRO_LIBEXEC_DIR);
            if fs.stat(&alt).is_ok() {
                alt
            } else {
                default_dir
            }
        }
        _ => default_dir,
    }
}

/// `/var/cache/fontconfig` holds for Ubuntu, Debian, openSUSE and Arch.
///
/// Fedora and CentOS moved to `/usr/lib/fontconfig/cache`, but snaps may
/// carry an older libfontconfig that still uses the old location, so both
/// are exposed there. Amazon Linux 2 is fedora-like yet still on the old path.
fn fontconfig_cache_dirs(root: &Path, release: &dyn ReleaseInfo) -> Vec<PathBuf> {
    let mut dirs = vec![join_under(root, "/var/cache/fontconfig")];
    if release.distro_like(&["fedora"]) && !release.distro_like(&["amzn"]) {
        dirs.push(join_under(root, "/usr/lib/fontconfig/cache"));
    }
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapd_platform::HostFilesystem;
    use snapd_release::FixedRelease;
    use tempfile::TempDir;

    fn compute(root: &Path, release: &FixedRelease) -> PathTable {
        PathTable::compute(
            root,
            &root.join("snap"),
            &HostFilesystem::new(),
            release,
        )
    }

    #[test]
    fn test_layered_entries() {
        let root = Path::new("/tmp/nonexistent-root");
        let table = compute(root, &FixedRelease::classic("ubuntu"));
        assert_eq!(
            table.snap_seccomp_dir,
            root.join("var/lib/snapd/seccomp/bpf")
        );
        assert_eq!(table.snap_names_file, root.join("var/cache/snapd/names"));
        assert_eq!(
            table.snap_repair_state_file,
            root.join("var/lib/snapd/repair/repair.json")
        );
        assert_eq!(table.snap_run_ns_dir, root.join("run/snapd/ns"));
        assert_eq!(table.snap_gpio_chardev_dir, root.join("dev/snap/gpio-chardev"));
        assert_eq!(table.snap_binaries_dir, root.join("snap/bin"));
        assert_eq!(table.xdg_runtime_dir_glob, root.join("run/user/*"));
        assert_eq!(table.snap_kmod_modules_dir, root.join("etc/modules-load.d"));
        assert_eq!(
            table.completion_helper_in_core,
            PathBuf::from("/usr/lib/snapd/etelpmoc.sh")
        );
    }

    #[test]
    fn test_writable_mount_path_classic_vs_core() {
        let root = Path::new("/tmp/nonexistent-root");
        let classic = compute(root, &FixedRelease::classic("ubuntu"));
        assert_eq!(classic.writable_mount_path, root);
        assert_eq!(
            classic.writable_ubuntu_core_system_data_dir,
            root.join("system-data")
        );

        let core = compute(root, &FixedRelease::core());
        assert_eq!(core.writable_mount_path, root.join("writable"));
        assert_eq!(
            core.writable_ubuntu_core_system_data_dir,
            root.join("writable/system-data")
        );
    }

    #[test]
    fn test_fontconfig_cache_dirs() {
        let root = Path::new("/");
        let ubuntu = compute(root, &FixedRelease::classic("ubuntu"));
        assert_eq!(
            ubuntu.system_fontconfig_cache_dirs,
            vec![PathBuf::from("/var/cache/fontconfig")]
        );

        let fedora = compute(root, &FixedRelease::classic("fedora"));
        assert_eq!(
            fedora.system_fontconfig_cache_dirs,
            vec![
                PathBuf::from("/var/cache/fontconfig"),
                PathBuf::from("/usr/lib/fontconfig/cache"),
            ]
        );

        let amzn = compute(root, &FixedRelease::classic("amzn").like("fedora"));
        assert_eq!(amzn.system_fontconfig_cache_dirs.len(), 1);
    }

    #[test]
    fn test_libexec_fallback() {
        let temp = TempDir::new().unwrap();
        let release = FixedRelease::classic("fedora");

        let table = compute(temp.path(), &release);
        assert_eq!(table.distro_libexec_dir, temp.path().join("usr/lib/snapd"));

        std::fs::create_dir_all(temp.path().join("usr/libexec/snapd")).unwrap();
        let table = compute(temp.path(), &release);
        assert_eq!(table.distro_libexec_dir, temp.path().join("usr/libexec/snapd"));

        std::fs::create_dir_all(temp.path().join("usr/lib/snapd")).unwrap();
        let table = compute(temp.path(), &release);
        assert_eq!(table.distro_libexec_dir, temp.path().join("usr/lib/snapd"));
    }
}
