//! Package installation with bounded retries
//!
//! This module handles:
//! - Building the install command for a package (pacman or Flatpak)
//! - Running it up to [`MAX_ATTEMPTS`] times with a fixed delay between attempts
//! - Classifying entries that never reach an installer (invalid, unknown method)
//! - Recording exactly one [`InstallationRecord`] per processed entry
//!
//! A failed package never aborts the run. Only a termination signal stops
//! processing early, surfacing as [`PkgError::Interrupted`](crate::error::PkgError).

pub mod record;


use std::time::Duration;

use console::Style;

use crate::config::{InstallMethod, PackageEntry, PackageList};
use crate::error::Result;
use crate::interrupt::Interrupt;
use crate::process::{CommandOutput, CommandRunner, CommandSpec, RunError};
use crate::ui::ProgressReporter;

pub use record::{InstallStatus, InstallationRecord, METHOD_UNKNOWN, Summary};

/// Attempts per package before giving up
pub const MAX_ATTEMPTS: u32 = 3;

/// Delay between failed attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Flatpak remote used for application installs
pub const SANDBOX_REMOTE: &str = "flathub";

/// `sudo pacman -S --noconfirm <package>`
pub fn native_install_command(package: &str) -> CommandSpec {
    CommandSpec::new("pacman", ["-S", "--noconfirm", package]).elevated()
}

/// `flatpak install -y flathub <app-id>`
pub fn sandbox_install_command(app_id: &str) -> CommandSpec {
    CommandSpec::new("flatpak", ["install", "-y", SANDBOX_REMOTE, app_id])
}

/// Install command for a package and method
pub fn install_command(package: &str, method: InstallMethod) -> CommandSpec {
    match method {
        InstallMethod::Native => native_install_command(package),
        InstallMethod::Sandbox => sandbox_install_command(package),
    }
}

/// Runs install commands and records their outcomes
pub struct Installer<'a> {
    runner: &'a dyn CommandRunner,
    interrupt: &'a Interrupt,
    retry_delay: Duration,
}

impl<'a> Installer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, interrupt: &'a Interrupt) -> Self {
        Self {
            runner,
            interrupt,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    #[must_use]
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Process every group in order: `global` first, then by name
    pub fn install_all(
        &self,
        list: &PackageList,
        progress: &mut dyn ProgressReporter,
        summary: &mut Summary,
    ) -> Result<()> {
        for group in list.ordered_groups() {
            progress.println(&format!(
                "\n{}",
                Style::new()
                    .blue()
                    .apply_to(format!("--- Processing group: {} ---", group.name))
            ));

            if group.members.is_empty() {
                progress.println(&format!(
                    "  {}",
                    Style::new()
                        .yellow()
                        .apply_to(format!("-> Group '{}' is empty, skipping.", group.name))
                ));
                continue;
            }

            progress.start_group(group.name, group.members.len());
            for entry in group.members {
                self.install_entry(group.name, entry, progress, summary)?;
                progress.advance();
            }
            progress.finish_group();

            progress.println(&format!(
                "{}",
                Style::new()
                    .green()
                    .apply_to(format!("--- Group '{}' finished ---", group.name))
            ));
        }

        Ok(())
    }

    /// Classify one entry and install it if it names a known method
    ///
    /// Returns whether the package was installed.
    pub fn install_entry(
        &self,
        group: &str,
        entry: &PackageEntry,
        progress: &mut dyn ProgressReporter,
        summary: &mut Summary,
    ) -> Result<bool> {
        self.interrupt.check()?;

        let Some(spec) = entry.spec() else {
            tracing::warn!(group, entry = entry.label(), "invalid package entry");
            progress.println(&format!(
                "{}",
                Style::new().yellow().apply_to(format!(
                    "Warning: invalid package entry in group '{group}': a non-empty 'name' is required."
                ))
            ));
            summary.record(
                entry.label(),
                METHOD_UNKNOWN,
                InstallStatus::FailedInvalidEntry,
            );
            return Ok(false);
        };

        match spec.method() {
            Ok(method) => self.install_package(&spec.name, method, progress, summary),
            Err(unknown) => {
                tracing::warn!(package = %spec.name, method = %unknown, "unknown install method");
                progress.println(&format!(
                    "{}",
                    Style::new().red().apply_to(format!(
                        "Error: unknown installation method '{unknown}' for package '{}'.",
                        spec.name
                    ))
                ));
                summary.record(
                    &spec.name,
                    METHOD_UNKNOWN,
                    InstallStatus::FailedUnknownMethod,
                );
                Ok(false)
            }
        }
    }

    /// Install one package, retrying failed attempts
    ///
    /// Appends exactly one record unless interrupted, and returns whether the
    /// package was installed. A missing installer ends the loop after the first
    /// attempt.
    pub fn install_package(
        &self,
        name: &str,
        method: InstallMethod,
        progress: &mut dyn ProgressReporter,
        summary: &mut Summary,
    ) -> Result<bool> {
        let command = install_command(name, method);
        let installer = method.installer();

        for attempt in 1..=MAX_ATTEMPTS {
            progress.attempt(name, method, attempt, MAX_ATTEMPTS);

            // A finished attempt is recorded even if a signal arrived while it ran
            match self.runner.run(&command) {
                Ok(output) if output.success() => {
                    progress.println(&format!(
                        "  {}",
                        Style::new()
                            .green()
                            .apply_to(format!("-> {name} installed successfully."))
                    ));
                    summary.record(name, method.label(), InstallStatus::Success);
                    return Ok(true);
                }
                Ok(output) => {
                    tracing::warn!(
                        package = name,
                        installer,
                        attempt,
                        status = %output.status_text(),
                        "install attempt failed"
                    );
                    report_failed_attempt(progress, name, installer, &output);
                }
                Err(RunError::NotFound(program)) => {
                    tracing::warn!(package = name, program = %program, "installer not found");
                    progress.println(&format!(
                        "{}",
                        Style::new().red().apply_to(format!(
                            "Error: '{program}' command not found. Is {installer} installed and on PATH?"
                        ))
                    ));
                    summary.record(name, method.label(), InstallStatus::FailedToolMissing);
                    return Ok(false);
                }
                Err(RunError::Spawn(err)) => {
                    tracing::warn!(package = name, attempt, error = %err, "install attempt failed to start");
                    progress.println(&format!(
                        "  {}",
                        Style::new().red().apply_to(format!(
                            "-> Could not run {installer} for {name}: {err}"
                        ))
                    ));
                }
            }

            if attempt < MAX_ATTEMPTS {
                self.interrupt.check()?;
                self.interrupt.sleep(self.retry_delay)?;
            }
        }

        progress.println(&format!(
            "  {}",
            Style::new().red().apply_to(format!(
                "-> Error: installing {name} failed after {MAX_ATTEMPTS} attempts. Please check manually."
            ))
        ));
        summary.record(name, method.label(), InstallStatus::FailedMaxRetries);
        Ok(false)
    }
}

fn report_failed_attempt(
    progress: &dyn ProgressReporter,
    name: &str,
    installer: &str,
    output: &CommandOutput,
) {
    let red = Style::new().red();
    progress.println(&format!(
        "  {}",
        red.apply_to(format!(
            "-> Failed to install {name} with {installer} ({}).",
            output.status_text()
        ))
    ));
    progress.println(&format!("  {}\n{}", red.apply_to("stdout:"), output.stdout.trim_end()));
    progress.println(&format!("  {}\n{}", red.apply_to("stderr:"), output.stderr.trim_end()));
}
