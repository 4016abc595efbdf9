//! Shell completions command

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::{PkgError, Result};

/// Generate shell completions on stdout
pub fn run(args: CompletionsArgs) -> Result<()> {
    let shell = parse_shell(&args.shell)?;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout().lock());

    Ok(())
}

/// Case-insensitive shell name, `pwsh` accepted for PowerShell
fn parse_shell(name: &str) -> Result<Shell> {
    match name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "elvish" => Ok(Shell::Elvish),
        "fish" => Ok(Shell::Fish),
        "powershell" | "pwsh" => Ok(Shell::PowerShell),
        "zsh" => Ok(Shell::Zsh),
        _ => Err(PkgError::UnknownShell {
            shell: name.to_string(),
        }),
    }
}
