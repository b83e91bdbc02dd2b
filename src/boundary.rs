use std::fmt;

/// Non-fatal conditions met while assembling or propagating bumps.
/// These are reported to the user but never abort the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A dependency edge references a module id absent from the registry
    /// (e.g. an external or unpublished coordinate)
    UnknownDependency { module: String, dependency: String },
    /// Commit header does not follow the conventional grammar; it resolves
    /// via the configured default bump
    MalformedCommit { hash: String, subject: String },
    /// Tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// No new commits for a module since its latest tag
    NoNewCommits { module: String, latest_tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnknownDependency { module, dependency } => {
                write!(
                    f,
                    "Module '{}' depends on '{}' which is not part of this repository; edge skipped",
                    module, dependency
                )
            }
            BoundaryWarning::MalformedCommit { hash, subject } => {
                let short_hash = if hash.len() > 7 { &hash[..7] } else { hash.as_str() };
                write!(
                    f,
                    "Commit {} is not a conventional commit: \"{}\"",
                    short_hash, subject
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::NoNewCommits { module, latest_tag } => {
                write!(
                    f,
                    "No new commits for module '{}' since tag '{}'",
                    module, latest_tag
                )
            }
        }
    }
}
