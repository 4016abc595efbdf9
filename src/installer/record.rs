//! Installation records and the run summary

use std::fmt;

/// Method label for entries that never reached an installer
pub const METHOD_UNKNOWN: &str = "unknown";

/// Final outcome for one package entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    Success,
    FailedUnknownMethod,
    FailedToolMissing,
    FailedMaxRetries,
    FailedInvalidEntry,
}

impl InstallStatus {
    pub fn is_success(self) -> bool {
        self == InstallStatus::Success
    }

    /// Label shown in the summary table
    pub fn label(self) -> &'static str {
        match self {
            InstallStatus::Success => "Success",
            InstallStatus::FailedUnknownMethod => "Failed (unknown method)",
            InstallStatus::FailedToolMissing => "Failed (installer not found)",
            InstallStatus::FailedMaxRetries => "Failed (max retries)",
            InstallStatus::FailedInvalidEntry => "Failed (invalid entry)",
        }
    }
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of processing one package entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationRecord {
    pub package: String,
    pub method: String,
    pub status: InstallStatus,
}

/// Append-only list of records for one run
#[derive(Debug, Clone, Default)]
pub struct Summary {
    records: Vec<InstallationRecord>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the outcome for one entry
    pub fn record(
        &mut self,
        package: impl Into<String>,
        method: impl Into<String>,
        status: InstallStatus,
    ) {
        let record = InstallationRecord {
            package: package.into(),
            method: method.into(),
            status,
        };
        tracing::debug!(
            package = %record.package,
            method = %record.method,
            status = %record.status,
            "recorded outcome"
        );
        self.records.push(record);
    }

    pub fn records(&self) -> &[InstallationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| r.status.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}
