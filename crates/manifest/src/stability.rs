//! Stability levels and default-stability inference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The compatibility guarantee an API element's author has made to its
/// consumers.
///
/// `Stable` is the strongest guarantee: consumers may assume no breaking
/// change will occur. `External` marks elements whose consumers are outside
/// the publishing organization's control; breakage is still tracked at this
/// level. `Deprecated` elements are slated for removal, so changes to them
/// are tracked but expected. Undecorated elements resolve to
/// `Experimental`, the weakest guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StabilityLevel {
    Experimental,
    Stable,
    External,
    Deprecated,
}

impl StabilityLevel {
    /// Every level, in declaration order.
    pub const ALL: [StabilityLevel; 4] = [
        StabilityLevel::Experimental,
        StabilityLevel::Stable,
        StabilityLevel::External,
        StabilityLevel::Deprecated,
    ];

    /// Resolve a declared-or-absent annotation to a concrete level.
    ///
    /// Absence always means `Experimental`. This is the single place the
    /// default is decided; no `Option<StabilityLevel>` escapes past manifest
    /// loading into the comparator.
    pub fn or_default(declared: Option<StabilityLevel>) -> StabilityLevel {
        declared.unwrap_or(StabilityLevel::Experimental)
    }

    /// Kebab-case spelling used in manifest JSON and console output.
    pub fn as_str(&self) -> &'static str {
        match self {
            StabilityLevel::Experimental => "experimental",
            StabilityLevel::Stable => "stable",
            StabilityLevel::External => "external",
            StabilityLevel::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for StabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized stability string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stability level: '{0}'")]
pub struct UnknownStability(pub String);

impl FromStr for StabilityLevel {
    type Err = UnknownStability;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "experimental" => Ok(StabilityLevel::Experimental),
            "stable" => Ok(StabilityLevel::Stable),
            "external" => Ok(StabilityLevel::External),
            "deprecated" => Ok(StabilityLevel::Deprecated),
            other => Err(UnknownStability(other.to_string())),
        }
    }
}
