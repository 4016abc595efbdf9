//! Host preconditions
//!
//! Checked once before anything is installed:
//! - every tool in [`REQUIRED_TOOLS`] resolves on `PATH` (`jq` is installed
//!   automatically when missing)
//! - the network answers a single ping
//! - `sudo` credentials are fresh
//!
//! Any failure here is fatal to the run.

pub mod sandbox;

use crate::error::{self, Result};
use crate::installer::native_install_command;
use crate::process::{CommandRunner, CommandSpec, ELEVATE_PROGRAM};
use crate::ui;

/// Tools that must be present before installing anything
pub const REQUIRED_TOOLS: &[&str] = &["pacman", "jq", "curl", "git", "ping", "makepkg"];

/// The one required tool installed automatically when missing
pub const AUTO_INSTALL_TOOL: &str = "jq";

/// Address probed for network reachability
pub const NETWORK_PROBE_TARGET: &str = "8.8.8.8";

/// Run all environment checks in order
pub fn validate(runner: &dyn CommandRunner) -> Result<()> {
    check_required_tools(runner)?;
    check_network(runner)?;
    Ok(())
}

/// Verify that every required tool resolves, installing `jq` if needed
pub fn check_required_tools(runner: &dyn CommandRunner) -> Result<()> {
    for tool in REQUIRED_TOOLS {
        if runner.locate(tool) {
            tracing::debug!(tool, "found required tool");
            continue;
        }

        if *tool == AUTO_INSTALL_TOOL {
            install_missing_tool(runner, tool)?;
        } else {
            return Err(error::environment::tool_missing(*tool));
        }
    }
    Ok(())
}

fn install_missing_tool(runner: &dyn CommandRunner, tool: &str) -> Result<()> {
    ui::notice(&format!(
        "'{tool}' is not installed. Trying to install '{tool}' automatically..."
    ));

    let command = native_install_command(tool);
    match runner.run(&command) {
        Ok(output) if output.success() => {
            ui::success(&format!("'{tool}' installed successfully."));
            Ok(())
        }
        Ok(output) => Err(error::environment::tool_install_failed(
            tool,
            format!(
                "`{command}` failed with {}: {}",
                output.status_text(),
                output.stderr.trim()
            ),
        )),
        Err(err) => Err(error::environment::tool_install_failed(
            tool,
            format!("`{command}`: {err}"),
        )),
    }
}

/// Probe the network with a single ping
pub fn check_network(runner: &dyn CommandRunner) -> Result<()> {
    ui::notice("Checking internet connection...");

    let probe = CommandSpec::new("ping", ["-c", "1", NETWORK_PROBE_TARGET]);
    match runner.run(&probe) {
        Ok(output) if output.success() => {
            ui::success("Internet connection available.");
            Ok(())
        }
        Ok(output) => {
            tracing::debug!(status = %output.status_text(), "network probe failed");
            Err(error::environment::network_unreachable(NETWORK_PROBE_TARGET))
        }
        Err(err) => {
            tracing::debug!(error = %err, "network probe could not run");
            Err(error::environment::network_unreachable(NETWORK_PROBE_TARGET))
        }
    }
}

/// Refresh `sudo` credentials so later installs do not stall on a prompt
pub fn refresh_elevation(runner: &dyn CommandRunner) -> Result<()> {
    ui::notice("Note: you may be asked for your sudo password.");

    let command = CommandSpec::new(ELEVATE_PROGRAM, ["-v"]);
    match runner.run(&command) {
        Ok(output) if output.success() => Ok(()),
        Ok(output) => Err(error::environment::elevation_failed(format!(
            "`{command}` failed with {}",
            output.status_text()
        ))),
        Err(err) => Err(error::environment::elevation_failed(err.to_string())),
    }
}
