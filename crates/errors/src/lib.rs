#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the snapd directory layout crates
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone so a recorded failure can be handed
//! out to any number of callers.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod dirs;
pub mod release;

// Re-export all error types at the root
pub use config::ConfigError;
pub use dirs::{DirsError, MountDirError};
pub use release::ReleaseError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("dirs error: {0}")]
    Dirs(#[from] DirsError),

    #[error("release error: {0}")]
    Release(#[from] ReleaseError),
}

/// Result type alias for snapd directory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for analytics / structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Dirs(err) => err.user_message(),
            Error::Config(err) => err.user_message(),
            Error::Release(err) => err.user_message(),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Dirs(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            Error::Release(err) => err.user_hint(),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Config(err) => err.user_code(),
            Error::Dirs(err) => err.user_code(),
            Error::Release(err) => err.user_code(),
        }
    }
}
