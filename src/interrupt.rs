//! Termination signal handling
//!
//! SIGINT and SIGTERM only raise a flag. The installation loop polls it between
//! packages and while waiting between attempts, and turns it into
//! [`PkgError::Interrupted`] so the run leaves through the normal finalize path.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{PkgError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Shared flag set when a termination signal arrives
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// A flag nobody else can set, for dry runs and tests
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the process-wide SIGINT/SIGTERM handler
    pub fn install_handler() -> Result<Self> {
        let interrupt = Self::new();
        let flag = Arc::clone(&interrupt.flag);
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
        .map_err(|e| PkgError::Io {
            message: format!("failed to install signal handler: {e}"),
        })?;
        Ok(interrupt)
    }

    /// Set the flag as if a signal had arrived
    #[cfg(test)]
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Fail with [`PkgError::Interrupted`] if a signal has arrived
    pub fn check(&self) -> Result<()> {
        if self.is_set() {
            tracing::warn!("termination signal received");
            return Err(PkgError::Interrupted);
        }
        Ok(())
    }

    /// Sleep for `duration`, returning early with an error if interrupted
    pub fn sleep(&self, duration: Duration) -> Result<()> {
        let deadline = Instant::now() + duration;
        loop {
            self.check()?;
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            std::thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}
