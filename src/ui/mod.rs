//! Console presentation layer
//!
//! This module handles:
//! - Progress reporting while a group is being installed
//! - Interactive progress bars using indicatif
//! - The final installation summary table ([`summary`])
//!
//! Installer output goes through the [`ProgressReporter`] trait so status lines are
//! printed without tearing the progress bar, and so tests can capture them.

pub mod summary;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::InstallMethod;
use crate::error::PkgError;

/// Progress reporter trait for the installation loop
pub trait ProgressReporter {
    /// A non-empty group with `total` entries is starting
    fn start_group(&mut self, name: &str, total: usize);

    /// An install attempt is starting
    fn attempt(&mut self, package: &str, method: InstallMethod, attempt: u32, max_attempts: u32);

    /// One entry of the current group is done
    fn advance(&mut self);

    /// The current group is done
    fn finish_group(&mut self);

    /// Print a status line
    fn println(&self, line: &str);

    /// Clear any bar left on screen after an error or interruption
    fn abandon(&mut self);
}

/// Interactive progress reporter with a per-group progress bar
///
/// indicatif hides the bar automatically when stdout is not a terminal; status
/// lines are still printed.
#[derive(Default)]
pub struct InteractiveProgressReporter {
    group_pb: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start_group(&mut self, name: &str, total: usize) {
        let style = ProgressStyle::default_bar()
            .template("  {prefix:.magenta} [{bar:30.magenta/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let pb = ProgressBar::new(total as u64);
        pb.set_style(style);
        pb.set_prefix(name.to_string());
        self.group_pb = Some(pb);
    }

    fn attempt(&mut self, package: &str, method: InstallMethod, attempt: u32, max_attempts: u32) {
        if let Some(pb) = &self.group_pb {
            pb.set_message(format!(
                "{package} via {} (attempt {attempt}/{max_attempts})",
                method.installer()
            ));
        }
    }

    fn advance(&mut self) {
        if let Some(pb) = &self.group_pb {
            pb.inc(1);
        }
    }

    fn finish_group(&mut self) {
        if let Some(pb) = self.group_pb.take() {
            pb.finish_and_clear();
        }
    }

    fn println(&self, line: &str) {
        match &self.group_pb {
            Some(pb) => pb.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }

    fn abandon(&mut self) {
        if let Some(pb) = self.group_pb.take() {
            pb.abandon();
        }
    }
}

/// Print a notice in yellow
pub fn notice(text: &str) {
    println!("{}", Style::new().yellow().apply_to(text));
}

/// Print a success line in green
pub fn success(text: &str) {
    println!("{}", Style::new().green().apply_to(text));
}

/// Print a heading in blue
pub fn heading(text: &str) {
    println!("{}", Style::new().blue().apply_to(text));
}

/// Print a fatal error and its help text to stderr
pub fn print_error(err: &PkgError) {
    use miette::Diagnostic;

    eprintln!("{} {err}", Style::new().red().bold().apply_to("Error:"));
    if let Some(help) = err.help() {
        eprintln!("  {} {help}", Style::new().cyan().apply_to("help:"));
    }
}
