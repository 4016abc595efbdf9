//! pkgbatch - batch package installer
//!
//! Installs pacman packages and Flatpak applications listed in a grouped JSON file,
//! retrying failed installs and reporting every outcome in a final summary table.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod config;
mod environment;
mod error;
mod installer;
mod interrupt;
mod logging;
mod process;
mod temp;
#[cfg(test)]
mod test_fixtures;
mod ui;

use cli::{Cli, Commands};
use commands::install::EXIT_FATAL;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(args),
        Commands::Version => commands::version::run().map(|()| ExitCode::SUCCESS),
        Commands::Completions(args) => {
            commands::completions::run(args).map(|()| ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            ui::print_error(&e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}
