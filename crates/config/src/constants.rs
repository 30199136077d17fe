//! Well-known names used by the configuration layer

/// Environment variable overriding the global root directory
pub const ROOT_DIR_ENV: &str = "SNAPPY_GLOBAL_ROOT";

/// Environment variable carrying a comma separated home directory list
pub const HOMEDIRS_ENV: &str = "SNAPD_HOMEDIRS";

pub const DEFAULT_CONFIG_PATH: &str = "/etc/snapd/dirs.toml";
