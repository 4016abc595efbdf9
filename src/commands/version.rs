//! Version command implementation

use clap::CommandFactory;

use crate::cli::Cli;
use crate::error::Result;
use crate::installer::{MAX_ATTEMPTS, SANDBOX_REMOTE};

/// Print the `--version` line followed by build and installer details
pub fn run() -> Result<()> {
    print!("{}", report());
    Ok(())
}

fn report() -> String {
    let mut out = Cli::command().render_version().to_string();
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&format!(
        "\nBuild info:\n  Minimum Rust: {}\n  Profile: {}\n\
         \nInstallers:\n  native: pacman\n  sandbox: flatpak ({SANDBOX_REMOTE})\n  attempts per package: {MAX_ATTEMPTS}\n",
        env!("CARGO_PKG_RUST_VERSION"),
        if cfg!(debug_assertions) { "debug" } else { "release" },
    ));
    out
}
