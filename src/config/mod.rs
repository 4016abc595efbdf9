//! Package list handling
//!
//! The package list (`packages.json` by default) maps group names to arrays of
//! package entries:
//!
//! ```json
//! {
//!   "global": [{ "name": "git" }],
//!   "desktop": [{ "name": "org.mozilla.firefox", "flatpak": true }]
//! }
//! ```
//!
//! The `global` group must exist (it may be empty) and is always processed first.
//! Remaining groups follow in lexicographic order of their names.

pub mod package;


use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{self, Result};

// Re-export commonly used types
pub use package::{InstallMethod, PackageEntry};

/// Package list file used when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "packages.json";

/// Group that must be present and is processed before all others
pub const REQUIRED_GROUP: &str = "global";

/// A named group of package entries, borrowed from a [`PackageList`]
#[derive(Debug, Clone, Copy)]
pub struct PackageGroup<'a> {
    pub name: &'a str,
    pub members: &'a [PackageEntry],
}

/// Parsed package list, grouped by name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PackageList {
    groups: BTreeMap<String, Vec<PackageEntry>>,
}

impl PackageList {
    /// Load and validate a package list from disk
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(error::config::not_found(display));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| error::config::read_failed(&display, e.to_string()))?;

        Self::from_json_str(&content, &display)
    }

    /// Parse and validate a package list from JSON text
    ///
    /// `origin` is only used in error messages.
    pub fn from_json_str(content: &str, origin: &str) -> Result<Self> {
        let list: PackageList = serde_json::from_str(content)
            .map_err(|e| error::config::parse_failed(origin, e.to_string()))?;

        if !list.groups.contains_key(REQUIRED_GROUP) {
            return Err(error::config::invalid(format!(
                "required group '{REQUIRED_GROUP}' is missing from {origin}"
            )));
        }

        tracing::debug!(
            origin,
            groups = list.groups.len(),
            entries = list.total_entries(),
            "loaded package list"
        );

        Ok(list)
    }

    /// Look up a group by name
    #[cfg(test)]
    pub fn group(&self, name: &str) -> Option<&[PackageEntry]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    /// Groups in processing order: the required group first, then by name
    pub fn ordered_groups(&self) -> Vec<PackageGroup<'_>> {
        let required = self
            .groups
            .get_key_value(REQUIRED_GROUP)
            .map(|(name, members)| PackageGroup { name, members });

        let rest = self
            .groups
            .iter()
            .filter(|(name, _)| name.as_str() != REQUIRED_GROUP)
            .map(|(name, members)| PackageGroup { name, members });

        required.into_iter().chain(rest).collect()
    }

    /// Number of entries across all groups, valid or not
    pub fn total_entries(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Whether any entry selects the Flatpak installer
    pub fn requires_sandbox(&self) -> bool {
        self.groups
            .values()
            .flatten()
            .filter_map(PackageEntry::spec)
            .any(|spec| spec.method() == Ok(InstallMethod::Sandbox))
    }
}
