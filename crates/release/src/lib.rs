#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Distribution and environment detection
//!
//! Answers two questions for the rest of the workspace: is this a classic
//! (general purpose) installation or a core image, and does the running
//! distribution belong to a given family.

mod os_release;

pub use os_release::{OsRelease, OS_RELEASE_PATHS};

/// Identifier of the distribution shipped in core images
pub const UBUNTU_CORE_ID: &str = "ubuntu-core";

/// Read-only view of the running distribution
pub trait ReleaseInfo: Send + Sync {
    /// True on a full installation, false on a core image
    fn on_classic(&self) -> bool;

    /// True if the distribution ID, or any entry of its `ID_LIKE` list,
    /// equals one of `distros`
    fn distro_like(&self, distros: &[&str]) -> bool;
}

/// A release with fixed values, for image building and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRelease {
    id: String,
    id_like: Vec<String>,
    on_classic: bool,
}

impl FixedRelease {
    /// A classic installation of distribution `id`
    #[must_use]
    pub fn classic(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            id_like: Vec::new(),
            on_classic: true,
        }
    }

    /// A core image
    #[must_use]
    pub fn core() -> Self {
        Self {
            id: UBUNTU_CORE_ID.to_string(),
            id_like: Vec::new(),
            on_classic: false,
        }
    }

    /// Add a family this distribution is like
    #[must_use]
    pub fn like(mut self, family: impl Into<String>) -> Self {
        self.id_like.push(family.into());
        self
    }

    /// Distribution identifier
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl ReleaseInfo for FixedRelease {
    fn on_classic(&self) -> bool {
        self.on_classic
    }

    fn distro_like(&self, distros: &[&str]) -> bool {
        matches_family(&self.id, &self.id_like, distros)
    }
}

pub(crate) fn matches_family(id: &str, id_like: &[String], distros: &[&str]) -> bool {
    distros
        .iter()
        .any(|d| *d == id || id_like.iter().any(|like| like == d))
}
