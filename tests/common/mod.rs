//! Common test utilities for pkgbatch integration tests
//!
//! [`TestEnv`] builds a throwaway host: a directory of fake tools (`sudo`, `pacman`,
//! `flatpak`, `ping`, ...) that becomes the child's entire `PATH`, a private `TMPDIR`,
//! and a log file every fake tool appends its invocation to.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

const SUDO: &str = r#"#!/bin/sh
echo "sudo $*" >> "$FAKE_LOG"
if [ "$1" = "-v" ]; then
  exit 0
fi
exec "$@"
"#;

const PACMAN: &str = r#"#!/bin/sh
echo "pacman $*" >> "$FAKE_LOG"
for arg in "$@"; do pkg="$arg"; done
for fail in $FAKE_FAIL; do
  if [ "$fail" = "$pkg" ]; then
    echo "error: target not found: $pkg" >&2
    exit 1
  fi
done
echo "installing $pkg"
exit 0
"#;

const FLATPAK: &str = r#"#!/bin/sh
echo "flatpak $*" >> "$FAKE_LOG"
case "$1" in
  remotes)
    if [ -z "$FAKE_NO_REMOTE" ]; then
      printf 'flathub\tsystem\n'
    fi
    ;;
  install)
    for arg in "$@"; do app="$arg"; done
    for fail in $FAKE_FAIL; do
      if [ "$fail" = "$app" ]; then
        echo "error: No remote refs found for $app" >&2
        exit 1
      fi
    done
    ;;
esac
exit 0
"#;

const PING: &str = r#"#!/bin/sh
echo "ping $*" >> "$FAKE_LOG"
if [ -n "$FAKE_OFFLINE" ]; then
  echo "connect: Network is unreachable" >&2
  exit 2
fi
exit 0
"#;

const NOOP: &str = "#!/bin/sh\nexit 0\n";

/// A fake host for running the real binary
pub struct TestEnv {
    pub temp: TempDir,
    pub root: PathBuf,
    pub bin: PathBuf,
    pub tmp: PathBuf,
    pub log: PathBuf,
}

impl TestEnv {
    /// Create a host where every required tool is present and succeeds
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        let bin = root.join("bin");
        let tmp = root.join("tmp");
        std::fs::create_dir_all(&bin).expect("Failed to create bin directory");
        std::fs::create_dir_all(&tmp).expect("Failed to create tmp directory");
        let log = root.join("calls.log");
        std::fs::write(&log, "").expect("Failed to create log");

        let env = Self {
            temp,
            root,
            bin,
            tmp,
            log,
        };
        env.install_tool("sudo", SUDO);
        env.install_tool("pacman", PACMAN);
        env.install_tool("flatpak", FLATPAK);
        env.install_tool("ping", PING);
        for tool in ["jq", "curl", "git", "makepkg"] {
            env.install_tool(tool, NOOP);
        }
        env
    }

    /// Write an executable script into the fake `PATH`
    pub fn install_tool(&self, name: &str, script: &str) {
        let path = self.bin.join(name);
        std::fs::write(&path, script).expect("Failed to write fake tool");
        make_executable(&path);
    }

    /// Remove a tool from the fake `PATH`
    pub fn remove_tool(&self, name: &str) {
        std::fs::remove_file(self.bin.join(name)).expect("Failed to remove fake tool");
    }

    /// Write `packages.json` in the working directory
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.root.join("packages.json"), content).expect("Failed to write config");
    }

    /// The binary, confined to the fake host
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("pkgbatch").expect("binary should be built");
        self.confine(&mut cmd);
        cmd
    }

    /// A plain `std::process::Command` for tests that need the child's pid
    pub fn std_cmd(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_pkgbatch"));
        cmd.current_dir(&self.root)
            .env_clear()
            .env("PATH", &self.bin)
            .env("TMPDIR", &self.tmp)
            .env("FAKE_LOG", &self.log);
        cmd
    }

    fn confine(&self, cmd: &mut Command) {
        cmd.current_dir(&self.root)
            .env_clear()
            .env("PATH", &self.bin)
            .env("TMPDIR", &self.tmp)
            .env("FAKE_LOG", &self.log);
    }

    /// Invocations recorded by the fake tools, in order
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .expect("Failed to read log")
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Number of recorded invocations that start with `prefix`
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Per-run working directories left behind in `TMPDIR`
    pub fn leftover_workdirs(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.tmp)
            .expect("Failed to read tmp directory")
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("install_temp_"))
            })
            .collect()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)
        .expect("Failed to stat fake tool")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).expect("Failed to chmod fake tool");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
