use crate::error::{MonoBumpError, Result};
use std::fmt;

/// Resolved bump level for a module.
///
/// Totally ordered: `None < Patch < Minor < Major`. The derived `Ord`
/// follows declaration order, so `max` is the join of the four-level
/// lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BumpType {
    None,
    Patch,
    Minor,
    Major,
}

impl BumpType {
    /// Parse a bump keyword as used in configuration files
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(BumpType::None),
            "patch" => Ok(BumpType::Patch),
            "minor" => Ok(BumpType::Minor),
            "major" => Ok(BumpType::Major),
            other => Err(MonoBumpError::config(format!(
                "unknown bump type '{}' - expected major, minor, patch or none",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpType::None => "none",
            BumpType::Patch => "patch",
            BumpType::Minor => "minor",
            BumpType::Major => "major",
        }
    }

    /// Join two bump levels, keeping the stronger one
    pub fn merge(self, other: BumpType) -> BumpType {
        self.max(other)
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bump contribution configured for a commit type.
///
/// `Ignore` only exists in configuration: a commit type mapped to it
/// contributes nothing. It can never appear as a module's resolved state,
/// which is always a plain [BumpType].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitBump {
    Ignore,
    Apply(BumpType),
}

impl CommitBump {
    /// Parse a commit-type keyword: the four bump levels plus `ignore`
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "ignore" => Ok(CommitBump::Ignore),
            other => Ok(CommitBump::Apply(BumpType::parse(other).map_err(|_| {
                MonoBumpError::config(format!(
                    "unknown bump type '{}' - expected major, minor, patch, none or ignore",
                    other
                ))
            })?)),
        }
    }

    /// Collapse into the bump level a commit actually contributes
    pub fn resolve(self) -> BumpType {
        match self {
            CommitBump::Ignore => BumpType::None,
            CommitBump::Apply(bump) => bump,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitBump::Ignore => "ignore",
            CommitBump::Apply(bump) => bump.as_str(),
        }
    }
}

impl fmt::Display for CommitBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
