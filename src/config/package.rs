//! Package entries and installation method selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};

/// Label shown for entries that have no usable name
pub const INVALID_ENTRY_LABEL: &str = "<invalid entry>";

/// How a package gets installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallMethod {
    /// System package manager (pacman)
    Native,
    /// Flatpak application from the configured remote
    Sandbox,
}

impl InstallMethod {
    /// Short label used in the summary table
    pub fn label(self) -> &'static str {
        match self {
            InstallMethod::Native => "native",
            InstallMethod::Sandbox => "sandbox",
        }
    }

    /// Program that performs the installation
    pub fn installer(self) -> &'static str {
        match self {
            InstallMethod::Native => "pacman",
            InstallMethod::Sandbox => "flatpak",
        }
    }
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InstallMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "native" | "pacman" => Ok(InstallMethod::Native),
            "sandbox" | "flatpak" => Ok(InstallMethod::Sandbox),
            _ => Err(s.to_string()),
        }
    }
}

/// A well-formed package entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageSpec {
    /// Package name, or the application ID for Flatpak entries
    #[serde(deserialize_with = "non_empty_name")]
    pub name: String,

    /// Install through Flatpak instead of pacman
    ///
    /// Any truthy JSON value counts: `true`, a non-zero number, a non-empty string,
    /// array or object.
    #[serde(default, deserialize_with = "truthy")]
    pub flatpak: bool,

    /// Explicit method name, consulted only when `flatpak` is not true
    #[serde(default)]
    pub method: Option<String>,
}

impl PackageSpec {
    /// Resolve the installation method
    ///
    /// A truthy `flatpak` always wins. Otherwise an explicit `method` is parsed and an
    /// unrecognized one is returned as `Err` with the original text. With neither set
    /// the native package manager is used.
    pub fn method(&self) -> std::result::Result<InstallMethod, String> {
        if self.flatpak {
            return Ok(InstallMethod::Sandbox);
        }
        match &self.method {
            Some(method) => method.parse(),
            None => Ok(InstallMethod::Native),
        }
    }
}

/// One element of a group array
///
/// Entries that do not describe a package (no `name`, wrong field types, not an
/// object at all) are kept as `Invalid` so they can still be reported.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PackageEntry {
    Valid(PackageSpec),
    Invalid(serde_json::Value),
}

impl PackageEntry {
    /// The package spec, if the entry is well-formed
    pub fn spec(&self) -> Option<&PackageSpec> {
        match self {
            PackageEntry::Valid(spec) => Some(spec),
            PackageEntry::Invalid(_) => None,
        }
    }

    /// Name to display for this entry in output and the summary
    pub fn label(&self) -> &str {
        match self {
            PackageEntry::Valid(spec) => &spec.name,
            PackageEntry::Invalid(value) => value
                .get("name")
                .and_then(serde_json::Value::as_str)
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(INVALID_ENTRY_LABEL),
        }
    }
}

fn non_empty_name<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    if name.trim().is_empty() {
        return Err(de::Error::custom("package name must not be empty"));
    }
    Ok(name)
}

fn truthy<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    })
}
