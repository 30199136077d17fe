//! Directory layout error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Reasons the snap mount directory could not be determined
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountDirError {
    #[error("cannot stat {path}: {message}")]
    Stat { path: String, message: String },

    #[error("cannot read symlink {path}: {message}")]
    ReadLink { path: String, message: String },

    #[error("{path} must be a symbolic link to {expected}")]
    BadSymlink { path: String, expected: String },

    #[error("internal error: unresolved snap mount dir")]
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DirsError {
    #[error("cannot resolve snap mount directory: {0}")]
    MountDirUnresolved(#[source] MountDirError),
}

impl From<MountDirError> for DirsError {
    fn from(err: MountDirError) -> Self {
        Self::MountDirUnresolved(err)
    }
}

impl UserFacingError for DirsError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::MountDirUnresolved(MountDirError::BadSymlink { .. }) => {
                Some("Point /snap at /var/lib/snapd/snap or replace it with a directory.")
            }
            Self::MountDirUnresolved(_) => {
                Some("Check that the snap mount directory under the root is accessible.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Self::MountDirUnresolved(_) => Some("dirs.mount_dir_unresolved"),
        }
    }
}
