//! Install command implementation
//!
//! The installation process:
//! 1. Create the temporary working directory
//! 2. Load and validate the package list
//! 3. Check required tools and network, refresh sudo credentials
//! 4. Prepare Flatpak if any entry needs it
//! 5. Install each group, `global` first
//! 6. Print the summary (also on fatal errors and interruption)
//!
//! Every path through the run ends in [`finalize`], which prints the summary and
//! picks the exit code. The working directory guard is dropped after that.

use std::process::ExitCode;
use std::time::Duration;

use crate::cli::InstallArgs;
use crate::config::{PackageEntry, PackageList};
use crate::environment;
use crate::error::{PkgError, Result};
use crate::installer::{Installer, Summary, install_command};
use crate::interrupt::Interrupt;
use crate::process::{CommandRunner, SystemRunner};
use crate::temp::WorkDir;
use crate::ui::{self, InteractiveProgressReporter, ProgressReporter, summary};

/// Exit code when every step ran (individual packages may have failed)
pub const EXIT_COMPLETE: u8 = 0;

/// Exit code for fatal errors and interruption
pub const EXIT_FATAL: u8 = 1;

/// Exit code with `--strict` when at least one package failed
pub const EXIT_PACKAGE_FAILURES: u8 = 2;

/// Run install command
pub fn run(args: InstallArgs) -> Result<ExitCode> {
    if args.dry_run {
        return dry_run(&args);
    }

    let setup = Interrupt::install_handler()
        .and_then(|interrupt| WorkDir::create().map(|workdir| (interrupt, workdir)));
    let (interrupt, workdir) = match setup {
        Ok(setup) => setup,
        Err(err) => {
            return Ok(ExitCode::from(finalize(
                Err(err),
                &Summary::new(),
                args.strict,
            )));
        }
    };
    let runner = SystemRunner::new().with_workdir(workdir.path());

    ui::heading("Starting package installation...");

    let mut progress = InteractiveProgressReporter::new();
    let mut summary = Summary::new();
    let outcome = execute(&args, &runner, &interrupt, &mut progress, &mut summary);
    if outcome.is_err() {
        progress.abandon();
    }

    let code = finalize(outcome, &summary, args.strict);
    ui::notice(&format!(
        "Cleaning up temporary directory ({})...",
        workdir.path().display()
    ));
    drop(workdir);
    Ok(ExitCode::from(code))
}

/// Everything between startup and the summary
pub fn execute(
    args: &InstallArgs,
    runner: &dyn CommandRunner,
    interrupt: &Interrupt,
    progress: &mut dyn ProgressReporter,
    summary: &mut Summary,
) -> Result<()> {
    let list = PackageList::load(&args.config)?;
    interrupt.check()?;

    environment::validate(runner)?;
    environment::refresh_elevation(runner)?;
    interrupt.check()?;

    ui::notice(
        "Flatpak applications (\"flatpak\": true) must be given by their application ID, \
         e.g. org.mozilla.firefox.",
    );
    if list.requires_sandbox() {
        environment::sandbox::ensure_ready(runner)?;
    }

    Installer::new(runner, interrupt)
        .with_retry_delay(Duration::from_secs(args.retry_delay))
        .install_all(&list, progress, summary)?;

    ui::success("\nAll packages and groups processed.");
    Ok(())
}

/// Report the outcome of a run and choose the exit code
///
/// The summary is printed on every path, including fatal errors and interruption.
pub fn finalize(outcome: Result<()>, summary: &Summary, strict: bool) -> u8 {
    let code = match &outcome {
        Ok(()) if strict && summary.has_failures() => EXIT_PACKAGE_FAILURES,
        Ok(()) => EXIT_COMPLETE,
        Err(PkgError::Interrupted) => {
            eprintln!(
                "\n{}",
                console::Style::new()
                    .red()
                    .apply_to("Termination signal received. Stopping...")
            );
            EXIT_FATAL
        }
        Err(err) => {
            ui::print_error(err);
            EXIT_FATAL
        }
    };

    summary::print(summary);
    code
}

fn dry_run(args: &InstallArgs) -> Result<ExitCode> {
    let list = PackageList::load(&args.config)?;
    let mut planned = 0;

    for group in list.ordered_groups() {
        ui::heading(&format!("[DRY RUN] Group '{}'", group.name));
        if group.members.is_empty() {
            ui::notice(&format!("  Group '{}' is empty, skipping.", group.name));
            continue;
        }

        for entry in group.members {
            match plan_entry(entry) {
                Ok(command) => {
                    planned += 1;
                    println!("  {}: {command}", entry.label());
                }
                Err(reason) => ui::notice(&format!("  {}: skipped ({reason})", entry.label())),
            }
        }
    }

    if list.requires_sandbox() {
        println!("[DRY RUN] Flatpak and the flathub remote would be checked first");
    }
    println!(
        "[DRY RUN] Would install {planned} package(s) from {} group(s)",
        list.ordered_groups().len()
    );

    Ok(ExitCode::from(EXIT_COMPLETE))
}

/// The command an entry would run, or why it would be skipped
fn plan_entry(entry: &PackageEntry) -> std::result::Result<String, String> {
    let spec = entry.spec().ok_or_else(|| "invalid entry".to_string())?;
    let method = spec
        .method()
        .map_err(|unknown| format!("unknown method '{unknown}'"))?;
    Ok(install_command(&spec.name, method).to_string())
}
