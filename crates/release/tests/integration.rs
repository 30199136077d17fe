//! Integration tests for os-release discovery

#[cfg(test)]
mod tests {
    use snapd_errors::ReleaseError;
    use snapd_release::{OsRelease, ReleaseInfo};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_under_prefers_etc() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("etc")).unwrap();
        fs::create_dir_all(temp.path().join("usr/lib")).unwrap();
        fs::write(temp.path().join("etc/os-release"), "ID=debian\n").unwrap();
        fs::write(temp.path().join("usr/lib/os-release"), "ID=arch\n").unwrap();

        let release = OsRelease::read_under(temp.path()).unwrap();
        assert_eq!(release.id, "debian");
    }

    #[test]
    fn test_read_under_falls_back_to_usr_lib() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("usr/lib")).unwrap();
        fs::write(
            temp.path().join("usr/lib/os-release"),
            "ID=ubuntucoreinitramfs\n",
        )
        .unwrap();

        let release = OsRelease::read_under(temp.path()).unwrap();
        assert!(release.distro_like(&["ubuntucoreinitramfs"]));
    }

    #[test]
    fn test_read_under_missing() {
        let temp = TempDir::new().unwrap();
        let err = OsRelease::read_under(temp.path()).unwrap_err();
        assert!(matches!(err, ReleaseError::Unreadable { .. }));
    }
}
