//! Host environment errors

use super::PkgError;

/// Creates a missing tool error with an install hint
pub fn tool_missing(tool: impl Into<String>) -> PkgError {
    let tool = tool.into();
    PkgError::ToolMissing {
        hint: format!("sudo pacman -S {tool}"),
        tool,
    }
}

/// Creates a failed auto-install error
pub fn tool_install_failed(tool: impl Into<String>, reason: impl Into<String>) -> PkgError {
    PkgError::ToolInstallFailed {
        tool: tool.into(),
        reason: reason.into(),
    }
}

/// Creates a network unreachable error
pub fn network_unreachable(target: impl Into<String>) -> PkgError {
    PkgError::NetworkUnreachable {
        target: target.into(),
    }
}

/// Creates a privilege elevation error
pub fn elevation_failed(reason: impl Into<String>) -> PkgError {
    PkgError::ElevationFailed {
        reason: reason.into(),
    }
}

/// Creates a Flatpak setup error
pub fn sandbox_setup_failed(reason: impl Into<String>) -> PkgError {
    PkgError::SandboxSetupFailed {
        reason: reason.into(),
    }
}
