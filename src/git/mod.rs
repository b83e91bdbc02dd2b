//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git queries the
//! bump computation consumes and the tagging it produces, allowing for a
//! real implementation backed by the `git2` crate and a mock
//! implementation for testing.
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations. Commit lists come back path-filtered per module scope,
//! which is how commits are attributed to modules; the core never inspects
//! paths itself.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::Tag;
use crate::error::Result;

/// Raw commit as handed over by the git layer, before classification
#[derive(Debug, Clone, PartialEq)]
pub struct RawCommit {
    /// The commit hash
    pub hash: String,
    /// The full commit message
    pub message: String,
    /// The commit author
    pub author: String,
}

/// Common git operation trait for abstraction.
///
/// All implementors must be `Send + Sync`. Commit lists are returned in
/// chronological order (oldest first). `path_scope` is a repository-relative
/// prefix restricting results to commits touching files under it; `None`
/// means the whole tree.
pub trait Repository: Send + Sync {
    /// Commits reachable from HEAD back to (excluding) the module's last
    /// release tag. When the module has no tag yet, the whole history is
    /// returned.
    fn commits_since_last_tag(
        &self,
        module: Option<&str>,
        path_scope: Option<&str>,
    ) -> Result<Vec<RawCommit>>;

    /// Commits in the range `from_rev` (exclusive) to `to_rev` (inclusive)
    fn commits_in_range(
        &self,
        from_rev: &str,
        to_rev: &str,
        path_scope: Option<&str>,
    ) -> Result<Vec<RawCommit>>;

    /// The most recent release tag for the given module scope (`None` =
    /// repository root), walking HEAD's history
    fn last_tag_for_module(&self, module: Option<&str>) -> Result<Option<Tag>>;

    /// All tags in the repository, parsed into their module/version parts
    fn all_tags(&self) -> Result<Vec<Tag>>;

    /// Create a lightweight tag at HEAD
    fn create_tag(&self, tag: &Tag) -> Result<()>;

    /// Whether the working directory has no uncommitted changes
    fn is_working_directory_clean(&self) -> Result<bool>;
}
