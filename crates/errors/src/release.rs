//! Release detection error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ReleaseError {
    #[error("cannot read os-release file {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("malformed os-release line {line}: {content}")]
    Malformed { line: usize, content: String },
}

impl UserFacingError for ReleaseError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Unreadable { .. } => {
                Some("Ensure /etc/os-release or /usr/lib/os-release exists under the root.")
            }
            Self::Malformed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::Unreadable { .. } => "release.unreadable",
            Self::Malformed { .. } => "release.malformed",
        })
    }
}
