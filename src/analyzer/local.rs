use crate::analyzer::resolver::bump_for_commit;
use crate::config::BumpRules;
use crate::domain::{BumpType, CommitInfo, Module, ModuleKind};
use crate::error::Result;
use crate::git::{RawCommit, Repository};
use std::collections::HashMap;

/// Resolves a module's local bump from its own commits
pub struct BumpAnalyzer {
    rules: BumpRules,
}

impl BumpAnalyzer {
    /// Create a new analyzer over validated bump rules
    pub fn new(rules: BumpRules) -> Self {
        BumpAnalyzer { rules }
    }

    pub fn rules(&self) -> &BumpRules {
        &self.rules
    }

    /// Classify raw commits for a module
    pub fn classify(&self, raw_commits: &[RawCommit], module: &Module) -> Vec<CommitInfo> {
        raw_commits
            .iter()
            .map(|raw| CommitInfo::parse(&raw.message, raw.hash.clone()).for_module(&module.id))
            .collect()
    }

    /// Fold the commits of one module into its local bump.
    ///
    /// Each commit contributes independently; the strongest contribution
    /// wins. A breaking commit short-circuits to major.
    pub fn analyze_commits(&self, commits: &[CommitInfo]) -> BumpType {
        let mut bump = BumpType::None;

        for commit in commits {
            bump = bump.merge(bump_for_commit(&commit.r#type, commit.breaking, &self.rules));
            if bump == BumpType::Major {
                // Nothing can outrank a major bump
                return bump;
            }
        }

        bump
    }

    /// Fetch, classify and fold the commits of one module since its last
    /// release tag.
    pub fn analyze_repository<R: Repository>(
        &self,
        repo: &R,
        module: &Module,
    ) -> Result<BumpType> {
        let module_scope = match module.kind {
            ModuleKind::Root => None,
            ModuleKind::Module => Some(module.id.as_str()),
        };
        let path_scope = if module.path == "." {
            None
        } else {
            Some(module.path.as_str())
        };
        let raw = repo.commits_since_last_tag(module_scope, path_scope)?;
        let commits = self.classify(&raw, module);
        Ok(self.analyze_commits(&commits))
    }

    /// Resolve local bumps for every module's commit list
    pub fn analyze_modules(
        &self,
        commits_by_module: &HashMap<String, Vec<CommitInfo>>,
    ) -> HashMap<String, BumpType> {
        commits_by_module
            .iter()
            .map(|(id, commits)| (id.clone(), self.analyze_commits(commits)))
            .collect()
    }
}
