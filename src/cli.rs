//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// pkgbatch - batch package installer
///
/// Install pacman packages and Flatpak applications from a grouped package list.
#[derive(Parser, Debug)]
#[command(
    name = "pkgbatch",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Batch installer for pacman packages and Flatpak applications",
    long_about = "pkgbatch installs the packages listed in a grouped JSON file. Native packages \
                  go through pacman, entries marked \"flatpak\": true through Flatpak. Failed \
                  installs are retried and every outcome is reported in a final summary.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  pkgbatch install\n    \
                  pkgbatch install --config ~/packages.json\n    \
                  pkgbatch install --dry-run\n    \
                  pkgbatch completions --shell zsh"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install every package in the package list
    Install(InstallArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install from ./packages.json:\n    pkgbatch install\n\n\
                   Install from another file:\n    pkgbatch install --config ~/dotfiles/packages.json\n\n\
                   Show what would be installed:\n    pkgbatch install --dry-run\n\n\
                   Fail the run when any package fails:\n    pkgbatch install --strict")]
pub struct InstallArgs {
    /// Package list to install from
    #[arg(
        long,
        short = 'c',
        value_name = "PATH",
        env = "PKGBATCH_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Seconds to wait before retrying a failed install
    #[arg(
        long,
        value_name = "SECONDS",
        env = "PKGBATCH_RETRY_DELAY",
        default_value_t = 2
    )]
    pub retry_delay: u64,

    /// Print the commands that would run without checking or changing the system
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with code 2 when any package failed to install
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    pkgbatch completions --shell bash > ~/.bash_completion.d/pkgbatch\n\n\
                  Generate zsh completions:\n    pkgbatch completions --shell zsh > ~/.zfunc/_pkgbatch\n\n\
                  Generate fish completions:\n    pkgbatch completions --shell fish > ~/.config/fish/completions/pkgbatch.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
