//! Flatpak readiness
//!
//! Runs once per invocation, and only when some entry asks for Flatpak. Installs
//! Flatpak through pacman if it is missing and registers the Flathub remote unless
//! it is already listed.

use crate::error::{self, Result};
use crate::installer::{SANDBOX_REMOTE, native_install_command};
use crate::process::{CommandOutput, CommandRunner, CommandSpec};
use crate::ui;

/// Program providing the sandbox runtime
pub const SANDBOX_PROGRAM: &str = "flatpak";

/// Repository file for [`SANDBOX_REMOTE`]
pub const SANDBOX_REMOTE_URL: &str = "https://flathub.org/repo/flathub.flatpakrepo";

/// Make sure Flatpak is installed and the remote is configured
pub fn ensure_ready(runner: &dyn CommandRunner) -> Result<()> {
    ui::heading("\nChecking Flatpak installation and configuration...");

    if runner.locate(SANDBOX_PROGRAM) {
        ui::success("Flatpak is already installed.");
    } else {
        ui::notice("Flatpak is not installed. Installing it with pacman...");
        run_checked(runner, &native_install_command(SANDBOX_PROGRAM))?;
        ui::success("Flatpak installed successfully.");
    }

    ui::notice(&format!("Checking {SANDBOX_REMOTE} remote..."));
    let listing = run_checked(runner, &CommandSpec::new(SANDBOX_PROGRAM, ["remotes"]))?;
    if remote_registered(&listing.stdout, SANDBOX_REMOTE) {
        ui::success(&format!("{SANDBOX_REMOTE} remote is already configured."));
    } else {
        ui::notice(&format!("{SANDBOX_REMOTE} remote not found. Adding it..."));
        run_checked(
            runner,
            &CommandSpec::new(
                SANDBOX_PROGRAM,
                [
                    "remote-add",
                    "--if-not-exists",
                    SANDBOX_REMOTE,
                    SANDBOX_REMOTE_URL,
                ],
            ),
        )?;
        ui::success(&format!("{SANDBOX_REMOTE} added successfully."));
    }

    ui::success("Flatpak is ready.");
    Ok(())
}

/// Whether `remote` appears as a name in `flatpak remotes` output
pub fn remote_registered(listing: &str, remote: &str) -> bool {
    listing
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .any(|name| name == remote)
}

fn run_checked(runner: &dyn CommandRunner, command: &CommandSpec) -> Result<CommandOutput> {
    match runner.run(command) {
        Ok(output) if output.success() => Ok(output),
        Ok(output) => Err(error::environment::sandbox_setup_failed(format!(
            "`{command}` failed with {}: {}",
            output.status_text(),
            output.stderr.trim()
        ))),
        Err(err) => Err(error::environment::sandbox_setup_failed(format!(
            "`{command}`: {err}"
        ))),
    }
}
