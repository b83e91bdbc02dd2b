use crate::domain::Tag;
use crate::error::{MonoBumpError, Result};
use crate::git::{RawCommit, Repository};
use git2::{Commit, Oid, Repository as Git2Repo, StatusOptions};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Git2Repository { repo })
    }

    /// Create from an existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_oid(&self) -> Result<Oid> {
        let head = self.repo.head()?.peel_to_commit()?;
        Ok(head.id())
    }

    /// All tags with the commit OID they point at (lightweight and
    /// annotated tags are both peeled to their commit)
    fn tags_with_oids(&self) -> Result<Vec<(Oid, Tag)>> {
        let mut tags = Vec::new();
        let names = self.repo.tag_names(None)?;

        for name in names.iter().flatten() {
            if let Ok(reference) = self.repo.find_reference(&format!("refs/tags/{}", name)) {
                if let Ok(object) = reference.peel(git2::ObjectType::Commit) {
                    tags.push((object.id(), Tag::parse(name)));
                }
            }
        }

        Ok(tags)
    }

    /// Latest tag for a module scope together with its commit OID, walking
    /// HEAD's history backwards
    fn last_tag_with_oid(&self, module: Option<&str>) -> Result<Option<(Oid, Tag)>> {
        let mut tag_oids = std::collections::HashMap::new();
        for (oid, tag) in self.tags_with_oids()? {
            if tag.matches_module(module) && tag.version.is_some() {
                tag_oids.insert(oid, tag);
            }
        }

        if tag_oids.is_empty() {
            return Ok(None);
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(self.head_oid()?)?;

        for oid in revwalk {
            let oid = oid?;
            if let Some(tag) = tag_oids.remove(&oid) {
                return Ok(Some((oid, tag)));
            }
        }

        Ok(None)
    }

    /// Whether a commit changed any file under `scope`.
    ///
    /// Diffs against the first parent; the initial commit diffs against
    /// the empty tree.
    fn commit_touches_path(&self, commit: &Commit<'_>, scope: &str) -> Result<bool> {
        let tree = commit.tree()?;
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree()?),
            Err(_) => None,
        };

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let scope_path = Path::new(scope);
        for delta in diff.deltas() {
            let touched = delta
                .new_file()
                .path()
                .map(|p| p.starts_with(scope_path))
                .unwrap_or(false)
                || delta
                    .old_file()
                    .path()
                    .map(|p| p.starts_with(scope_path))
                    .unwrap_or(false);
            if touched {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Walk history from `to` back to (excluding) `stop`, collecting
    /// commits that touch `path_scope`. Chronological order, oldest first.
    fn collect_commits(
        &self,
        to: Oid,
        stop: Option<Oid>,
        path_scope: Option<&str>,
    ) -> Result<Vec<RawCommit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(to)?;
        if let Some(stop) = stop {
            revwalk.hide(stop)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;

            if let Some(scope) = path_scope {
                if !self.commit_touches_path(&commit, scope)? {
                    continue;
                }
            }

            commits.push(RawCommit {
                hash: oid.to_string(),
                message: commit.message().unwrap_or("(empty message)").to_string(),
                author: commit.author().name().unwrap_or("unknown").to_string(),
            });
        }

        // Revwalk yields newest first
        commits.reverse();
        Ok(commits)
    }

    fn resolve_commit_oid(&self, rev: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(rev)?;
        let commit = object.peel(git2::ObjectType::Commit)?;
        Ok(commit.id())
    }
}

impl Repository for Git2Repository {
    fn commits_since_last_tag(
        &self,
        module: Option<&str>,
        path_scope: Option<&str>,
    ) -> Result<Vec<RawCommit>> {
        let stop = self.last_tag_with_oid(module)?.map(|(oid, _)| oid);
        self.collect_commits(self.head_oid()?, stop, path_scope)
    }

    fn commits_in_range(
        &self,
        from_rev: &str,
        to_rev: &str,
        path_scope: Option<&str>,
    ) -> Result<Vec<RawCommit>> {
        let from = self.resolve_commit_oid(from_rev)?;
        let to = self.resolve_commit_oid(to_rev)?;
        self.collect_commits(to, Some(from), path_scope)
    }

    fn last_tag_for_module(&self, module: Option<&str>) -> Result<Option<Tag>> {
        Ok(self.last_tag_with_oid(module)?.map(|(_, tag)| tag))
    }

    fn all_tags(&self) -> Result<Vec<Tag>> {
        Ok(self
            .tags_with_oids()?
            .into_iter()
            .map(|(_, tag)| tag)
            .collect())
    }

    fn create_tag(&self, tag: &Tag) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo
            .tag_lightweight(&tag.name, head.as_object(), false)
            .map_err(|e| {
                MonoBumpError::tag(format!("cannot create tag '{}': {}", tag.name, e))
            })?;
        Ok(())
    }

    fn is_working_directory_clean(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);
        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses.is_empty())
    }
}
