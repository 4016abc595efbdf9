//! Subprocess execution
//!
//! Every external program (pacman, flatpak, ping, sudo) is started through the
//! [`CommandRunner`] trait so the installation logic can be exercised without
//! touching the host system.

use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Program used to run commands with elevated privileges
pub const ELEVATE_PROGRAM: &str = "sudo";

/// A command to run, before program resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Run through [`ELEVATE_PROGRAM`]
    pub elevated: bool,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            elevated: false,
        }
    }

    /// Same command, run with elevated privileges
    #[must_use]
    pub fn elevated(mut self) -> Self {
        self.elevated = true;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elevated {
            write!(f, "{ELEVATE_PROGRAM} ")?;
        }
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human readable exit status
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Why a command could not produce an exit status
#[derive(Debug)]
pub enum RunError {
    /// The program is not on `PATH`
    NotFound(String),
    /// The program was found but could not be started or waited on
    Spawn(std::io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::NotFound(program) => write!(f, "command '{program}' not found"),
            RunError::Spawn(err) => write!(f, "failed to run command: {err}"),
        }
    }
}

impl std::error::Error for RunError {}

/// Executes external commands synchronously
pub trait CommandRunner {
    /// Run a command to completion, capturing its output
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunError>;

    /// Whether a program can be resolved on `PATH`
    fn locate(&self, program: &str) -> bool;
}

/// Runs commands on the host
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    /// Working directory for spawned processes
    workdir: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn processes inside `workdir`
    #[must_use]
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunError> {
        let program = which::which(&spec.program)
            .map_err(|_| RunError::NotFound(spec.program.clone()))?;

        let mut command = if spec.elevated {
            let elevate = which::which(ELEVATE_PROGRAM)
                .map_err(|_| RunError::NotFound(ELEVATE_PROGRAM.to_string()))?;
            let mut command = Command::new(elevate);
            command.arg(&program);
            command
        } else {
            Command::new(&program)
        };

        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(workdir) = &self.workdir {
            command.current_dir(workdir);
        }

        tracing::debug!(command = %spec, resolved = %program.display(), "running command");

        let output = command.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RunError::NotFound(spec.program.clone())
            } else {
                RunError::Spawn(e)
            }
        })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(command = %spec, status = %result.status_text(), "command finished");

        Ok(result)
    }

    fn locate(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
