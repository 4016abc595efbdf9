//! Error types and handling for pkgbatch
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostic codes and help text.
//!
//! Only fatal conditions are errors. Per-package failures are recorded in the
//! installation summary instead and never surface here.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: package list loading errors
//! - [`environment`]: host preconditions (tools, network, elevation, sandbox runtime)

pub mod config;
pub mod environment;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pkgbatch operations
#[derive(Error, Diagnostic, Debug)]
pub enum PkgError {
    // Configuration errors
    #[error("Package list not found: {path}")]
    #[diagnostic(
        code(pkgbatch::config::not_found),
        help("Create the file or point to it with --config <PATH>")
    )]
    ConfigMissing { path: String },

    #[error("Failed to read package list: {path}: {reason}")]
    #[diagnostic(code(pkgbatch::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse package list: {path}: {reason}")]
    #[diagnostic(
        code(pkgbatch::config::parse_failed),
        help("The file must be a JSON object mapping group names to arrays of package objects")
    )]
    ConfigParseError { path: String, reason: String },

    #[error("Invalid package list: {message}")]
    #[diagnostic(
        code(pkgbatch::config::invalid),
        help("Add a \"global\" group to the file, even if it is an empty array")
    )]
    ConfigInvalid { message: String },

    // Environment errors
    #[error("Required tool '{tool}' is not installed")]
    #[diagnostic(code(pkgbatch::env::tool_missing), help("Install it and try again: {hint}"))]
    ToolMissing { tool: String, hint: String },

    #[error("Failed to install required tool '{tool}': {reason}")]
    #[diagnostic(code(pkgbatch::env::tool_install_failed))]
    ToolInstallFailed { tool: String, reason: String },

    #[error("No network connection ({target} is unreachable)")]
    #[diagnostic(
        code(pkgbatch::env::network_unreachable),
        help("Make sure you are online and try again")
    )]
    NetworkUnreachable { target: String },

    #[error("Privilege elevation failed: {reason}")]
    #[diagnostic(code(pkgbatch::env::elevation_failed))]
    ElevationFailed { reason: String },

    #[error("Failed to prepare Flatpak: {reason}")]
    #[diagnostic(code(pkgbatch::env::sandbox_setup_failed))]
    SandboxSetupFailed { reason: String },

    #[error("Failed to create temporary directory: {reason}")]
    #[diagnostic(code(pkgbatch::fs::temp_dir_failed))]
    TempDirFailed { reason: String },

    // Run control
    #[error("Interrupted by termination signal")]
    #[diagnostic(code(pkgbatch::run::interrupted))]
    Interrupted,

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(pkgbatch::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(pkgbatch::fs::io_error))]
    Io { message: String },
}

impl From<std::io::Error> for PkgError {
    fn from(err: std::io::Error) -> Self {
        PkgError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PkgError>;
