//! Integration tests for config

#[cfg(test)]
mod tests {
    use snapd_config::*;
    use snapd_errors::{ConfigError, Error};
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[root]
root_dir = "/srv/image"

[homedirs]
homedirs = "/home/users,/remote/home"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.root_dir(), PathBuf::from("/srv/image"));
        assert_eq!(config.homedirs.homedirs, "/home/users,/remote/home");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = Config::load_from_file(std::path::Path::new("/nonexistent/dirs.toml")).await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_load_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[root\nroot_dir = ").unwrap();

        let result = Config::load_or_default(Some(temp_file.path())).await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var(ROOT_DIR_ENV, "/tmp/chroot");
        std::env::set_var(HOMEDIRS_ENV, "/srv/home");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.root_dir(), PathBuf::from("/tmp/chroot"));
        assert_eq!(config.homedirs.homedirs, "/srv/home");

        // Clean up
        std::env::remove_var(ROOT_DIR_ENV);
        std::env::remove_var(HOMEDIRS_ENV);
    }

    #[test]
    fn test_empty_root_env_clears_override() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::set_var(ROOT_DIR_ENV, "");

        let mut config = Config::default();
        config.root.root_dir = Some(PathBuf::from("/srv/image"));
        config.merge_env().unwrap();
        assert_eq!(config.root_dir(), PathBuf::from("/"));

        std::env::remove_var(ROOT_DIR_ENV);
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();

        std::env::remove_var(HOMEDIRS_ENV);
        std::env::set_var(ROOT_DIR_ENV, "relative/root");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(result.is_err());

        // Clean up
        std::env::remove_var(ROOT_DIR_ENV);
    }
}
