//! Diagnostic logging to stderr
//!
//! Console progress and the summary table are printed directly; `tracing` carries
//! the structured diagnostics (commands run, exit codes, failed attempts).

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence. Otherwise only warnings are shown, or debug
/// events with `--verbose`.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "pkgbatch=debug"
    } else {
        "pkgbatch=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // Ignore the error when a subscriber is already set (e.g. in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
