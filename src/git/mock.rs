use crate::domain::Tag;
use crate::error::Result;
use crate::git::{RawCommit, Repository};
use std::sync::Mutex;

/// Mock repository for testing without actual git operations.
///
/// Commits are seeded together with the paths they touch; range and tag
/// boundaries are simplified - tests seed exactly the commits the query
/// under test should see.
pub struct MockRepository {
    commits: Vec<(RawCommit, Vec<String>)>,
    tags: Vec<Tag>,
    clean: bool,
    created_tags: Mutex<Vec<Tag>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: Vec::new(),
            clean: true,
            created_tags: Mutex::new(Vec::new()),
        }
    }

    /// Add a commit touching the given paths
    pub fn add_commit(&mut self, commit: RawCommit, paths: Vec<String>) {
        self.commits.push((commit, paths));
    }

    /// Add an existing tag
    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Mark the working directory dirty
    pub fn set_dirty(&mut self) {
        self.clean = false;
    }

    /// Tags created through the trait during the test
    pub fn created_tags(&self) -> Vec<Tag> {
        self.created_tags
            .lock()
            .map(|tags| tags.clone())
            .unwrap_or_default()
    }

    fn commits_touching(&self, path_scope: Option<&str>) -> Vec<RawCommit> {
        self.commits
            .iter()
            .filter(|(_, paths)| match path_scope {
                Some(scope) => paths.iter().any(|p| {
                    std::path::Path::new(p).starts_with(std::path::Path::new(scope))
                }),
                None => true,
            })
            .map(|(commit, _)| commit.clone())
            .collect()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn commits_since_last_tag(
        &self,
        _module: Option<&str>,
        path_scope: Option<&str>,
    ) -> Result<Vec<RawCommit>> {
        // Simplified: the tag boundary is ignored; seed only in-range commits
        Ok(self.commits_touching(path_scope))
    }

    fn commits_in_range(
        &self,
        _from_rev: &str,
        _to_rev: &str,
        path_scope: Option<&str>,
    ) -> Result<Vec<RawCommit>> {
        Ok(self.commits_touching(path_scope))
    }

    fn last_tag_for_module(&self, module: Option<&str>) -> Result<Option<Tag>> {
        Ok(self
            .tags
            .iter()
            .filter(|tag| tag.matches_module(module))
            .filter(|tag| tag.version.is_some())
            .max_by_key(|tag| tag.version)
            .cloned())
    }

    fn all_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn create_tag(&self, tag: &Tag) -> Result<()> {
        if let Ok(mut tags) = self.created_tags.lock() {
            tags.push(tag.clone());
        }
        Ok(())
    }

    fn is_working_directory_clean(&self) -> Result<bool> {
        Ok(self.clean)
    }
}
