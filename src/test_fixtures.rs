//! Test doubles and helpers shared by unit tests.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{RecordingReporter, ScriptedRunner};
//!
//! #[test]
//! fn my_test() {
//!     // Every command succeeds unless told otherwise
//!     let runner = ScriptedRunner::new().fail_times(2);
//!     let mut progress = RecordingReporter::default();
//!     // ...
//!     assert_eq!(runner.calls().len(), 3);
//! }
//! ```

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};

use tempfile::TempDir;

use crate::config::{InstallMethod, PackageList};
use crate::process::{CommandOutput, CommandRunner, CommandSpec, RunError};
use crate::ui::ProgressReporter;

enum Response {
    Exit(CommandOutput),
    NotFound,
}

/// A [`CommandRunner`] that replays scripted responses and records every call.
///
/// Responses are consumed in call order; once the script is exhausted every
/// command exits with code 0.
#[derive(Default)]
pub struct ScriptedRunner {
    missing: HashSet<String>,
    responses: RefCell<VecDeque<Response>>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `locate` report `program` as absent
    #[must_use]
    pub fn without_program(mut self, program: &str) -> Self {
        self.missing.insert(program.to_string());
        self
    }

    /// Queue a response with the given exit code and output
    #[must_use]
    pub fn then_exit(self, code: i32, stdout: &str, stderr: &str) -> Self {
        self.responses.borrow_mut().push_back(Response::Exit(CommandOutput {
            code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }));
        self
    }

    /// Queue a "command not found" response
    #[must_use]
    pub fn then_not_found(self) -> Self {
        self.responses.borrow_mut().push_back(Response::NotFound);
        self
    }

    /// Queue `times` failing responses
    #[must_use]
    pub fn fail_times(self, times: usize) -> Self {
        (0..times).fold(self, |runner, _| {
            runner.then_exit(1, "", "error: failed retrieving file")
        })
    }

    /// Every command run so far, in order
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, RunError> {
        self.calls.borrow_mut().push(spec.clone());
        match self.responses.borrow_mut().pop_front() {
            Some(Response::Exit(output)) => Ok(output),
            Some(Response::NotFound) => Err(RunError::NotFound(spec.program.clone())),
            None => Ok(CommandOutput {
                code: Some(0),
                ..CommandOutput::default()
            }),
        }
    }

    fn locate(&self, program: &str) -> bool {
        !self.missing.contains(program)
    }
}

/// A [`ProgressReporter`] that keeps everything it is told
#[derive(Default)]
pub struct RecordingReporter {
    pub lines: RefCell<Vec<String>>,
    pub groups: Vec<(String, usize)>,
    pub attempts: Vec<(String, InstallMethod, u32)>,
    pub advanced: usize,
}

impl RecordingReporter {
    /// All printed lines joined with newlines
    pub fn output(&self) -> String {
        self.lines.borrow().join("\n")
    }
}

impl ProgressReporter for RecordingReporter {
    fn start_group(&mut self, name: &str, total: usize) {
        self.groups.push((name.to_string(), total));
    }

    fn attempt(&mut self, package: &str, method: InstallMethod, attempt: u32, _max: u32) {
        self.attempts.push((package.to_string(), method, attempt));
    }

    fn advance(&mut self) {
        self.advanced += 1;
    }

    fn finish_group(&mut self) {}

    fn println(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }

    fn abandon(&mut self) {}
}

/// Parse a package list, panicking on invalid input
pub fn package_list(json: &str) -> PackageList {
    PackageList::from_json_str(json, "test.json").expect("test package list must parse")
}

/// Create a temp directory in the system temp location.
///
/// Uses `crate::temp::temp_dir_base()` to ensure temp dirs are never
/// created under the current working directory.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_runner_replays_then_succeeds() {
        let runner = ScriptedRunner::new().then_exit(3, "out", "err").then_not_found();
        let spec = CommandSpec::new("pacman", ["-Syu"]);

        let first = runner.run(&spec).expect("scripted exit");
        assert_eq!(first.code, Some(3));
        assert!(matches!(runner.run(&spec), Err(RunError::NotFound(_))));
        assert!(runner.run(&spec).expect("default success").success());
        assert_eq!(runner.calls().len(), 3);
    }

    #[test]
    fn test_create_temp_dir() {
        let temp = create_temp_dir();
        assert!(temp.path().exists());
    }
}
