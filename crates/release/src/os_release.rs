//! `os-release(5)` parsing

use std::path::{Path, PathBuf};

use snapd_errors::ReleaseError;
use tracing::{debug, warn};

use crate::{matches_family, ReleaseInfo, UBUNTU_CORE_ID};

/// Locations of the os-release file, in lookup order, relative to a root
pub const OS_RELEASE_PATHS: [&str; 2] = ["etc/os-release", "usr/lib/os-release"];

/// Distribution identity read from os-release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsRelease {
    pub id: String,
    pub id_like: Vec<String>,
    pub version_id: String,
}

impl Default for OsRelease {
    fn default() -> Self {
        Self {
            id: "linux".to_string(),
            id_like: Vec::new(),
            version_id: String::new(),
        }
    }
}

impl OsRelease {
    /// Parse the contents of an os-release file
    ///
    /// Blank lines and `#` comments are skipped. Values may be single or
    /// double quoted.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-comment line carries no `=` assignment.
    pub fn parse(content: &str) -> Result<Self, ReleaseError> {
        let mut release = Self::default();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ReleaseError::Malformed {
                    line: idx + 1,
                    content: raw.to_string(),
                });
            };
            let value = unquote(value.trim());
            match key.trim() {
                "ID" => release.id = value.to_string(),
                "ID_LIKE" => {
                    release.id_like = value.split_whitespace().map(str::to_string).collect();
                }
                "VERSION_ID" => release.version_id = value.to_string(),
                _ => {}
            }
        }
        Ok(release)
    }

    /// Read os-release below `root`, trying each of [`OS_RELEASE_PATHS`]
    ///
    /// # Errors
    ///
    /// Returns an error if none of the candidate files can be read, or the
    /// first readable one is malformed.
    pub fn read_under(root: &Path) -> Result<Self, ReleaseError> {
        let mut last_err = None;
        for rel in OS_RELEASE_PATHS {
            let path: PathBuf = root.join(rel);
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    debug!(path = %path.display(), "read os-release");
                    return Self::parse(&content);
                }
                Err(e) => {
                    last_err = Some(ReleaseError::Unreadable {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }
        Err(last_err.unwrap_or(ReleaseError::Unreadable {
            path: root.display().to_string(),
            message: "no candidate paths".to_string(),
        }))
    }

    /// Read the host's os-release, falling back to a generic `linux` identity
    #[must_use]
    pub fn from_host() -> Self {
        match Self::read_under(Path::new("/")) {
            Ok(release) => release,
            Err(e) => {
                warn!(error = %e, "cannot read os-release, assuming generic linux");
                Self::default()
            }
        }
    }
}

impl ReleaseInfo for OsRelease {
    fn on_classic(&self) -> bool {
        self.id != UBUNTU_CORE_ID
    }

    fn distro_like(&self, distros: &[&str]) -> bool {
        matches_family(&self.id, &self.id_like, distros)
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEDORA: &str = r#"NAME="Fedora Linux"
VERSION="40 (Workstation Edition)"
ID=fedora
VERSION_ID=40
# comment
PRETTY_NAME="Fedora Linux 40 (Workstation Edition)"
"#;

    #[test]
    fn test_parse_fedora() {
        let release = OsRelease::parse(FEDORA).unwrap();
        assert_eq!(release.id, "fedora");
        assert_eq!(release.version_id, "40");
        assert!(release.id_like.is_empty());
        assert!(release.on_classic());
        assert!(release.distro_like(&["fedora"]));
    }

    #[test]
    fn test_parse_id_like_list() {
        let release = OsRelease::parse("ID=\"centos\"\nID_LIKE='rhel fedora'\n").unwrap();
        assert_eq!(release.id, "centos");
        assert_eq!(release.id_like, vec!["rhel", "fedora"]);
        assert!(release.distro_like(&["fedora"]));
        assert!(!release.distro_like(&["debian"]));
    }

    #[test]
    fn test_parse_core() {
        let release = OsRelease::parse("ID=ubuntu-core\nVERSION_ID=24\n").unwrap();
        assert!(!release.on_classic());
    }

    #[test]
    fn test_parse_malformed_line() {
        let err = OsRelease::parse("ID=arch\nnot an assignment\n").unwrap_err();
        assert!(matches!(err, ReleaseError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_empty_defaults_to_linux() {
        let release = OsRelease::parse("").unwrap();
        assert_eq!(release.id, "linux");
        assert!(release.on_classic());
    }
}
