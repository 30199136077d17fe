//! Platform implementations

pub mod host;
