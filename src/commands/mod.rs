//! Command implementations for the pkgbatch CLI

pub mod completions;
pub mod install;
pub mod version;
