//! Configuration errors

use super::PkgError;

/// Creates a package list not found error
pub fn not_found(path: impl Into<String>) -> PkgError {
    PkgError::ConfigMissing { path: path.into() }
}

/// Creates a package list read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> PkgError {
    PkgError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a package list parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> PkgError {
    PkgError::ConfigParseError {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid package list error
pub fn invalid(message: impl Into<String>) -> PkgError {
    PkgError::ConfigInvalid {
        message: message.into(),
    }
}
