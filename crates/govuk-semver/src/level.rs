//! Increment levels

use std::fmt;
use std::str::FromStr;

use crate::VersionError;

/// Which part of a version an increment bumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Major,
    Minor,
    Patch,
    PreMajor,
    PreMinor,
    PrePatch,
    PreRelease,
}

impl Level {
    /// Get the string representation of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Major => "major",
            Level::Minor => "minor",
            Level::Patch => "patch",
            Level::PreMajor => "premajor",
            Level::PreMinor => "preminor",
            Level::PrePatch => "prepatch",
            Level::PreRelease => "prerelease",
        }
    }

    /// Human-readable description, resolved at display time
    pub fn description(&self) -> &'static str {
        match self {
            Level::Major => "Major release",
            Level::Minor => "Minor release",
            Level::Patch => "Patch release",
            Level::PreMajor => "Pre-release of the next major version",
            Level::PreMinor => "Pre-release of the next minor version",
            Level::PrePatch => "Pre-release of the next patch version",
            Level::PreRelease => "Next pre-release",
        }
    }

    /// Get all supported levels
    pub fn all() -> &'static [Level] {
        &[
            Level::Major,
            Level::Minor,
            Level::Patch,
            Level::PreMajor,
            Level::PreMinor,
            Level::PrePatch,
            Level::PreRelease,
        ]
    }
}

impl FromStr for Level {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::all()
            .iter()
            .find(|level| level.as_str() == s)
            .copied()
            .ok_or_else(|| VersionError::InvalidLevel(s.to_string()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
