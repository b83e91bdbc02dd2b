//! Pure mappings from classified commits and dependency bumps to bump levels

use crate::config::{BumpRules, DependencyRules};
use crate::domain::BumpType;

/// Resolve the bump a single commit contributes.
///
/// Breaking changes force a major bump regardless of the commit-type
/// mapping. Otherwise the configured table decides; commit types without
/// an entry (including malformed commits, whose type is empty) fall back
/// to the default bump.
pub fn bump_for_commit(commit_type: &str, breaking: bool, rules: &BumpRules) -> BumpType {
    if breaking {
        return BumpType::Major;
    }

    match rules.commit_types.get(commit_type) {
        Some(mapped) => mapped.resolve(),
        None => rules.default_bump.resolve(),
    }
}

/// Resolve the bump a dependent inherits from a dependency that resolved
/// to `dependency_bump`.
///
/// `None` never cascades: there is nothing to propagate.
pub fn bump_for_dependency(dependency_bump: BumpType, rules: &DependencyRules) -> BumpType {
    match dependency_bump {
        BumpType::None => BumpType::None,
        BumpType::Patch => rules.on_patch,
        BumpType::Minor => rules.on_minor,
        BumpType::Major => rules.on_major,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::CommitBump;

    fn rules() -> BumpRules {
        Config::default().validate().unwrap()
    }

    #[test]
    fn test_breaking_always_forces_major() {
        let rules = rules();
        for commit_type in ["feat", "fix", "docs", "unknown", ""] {
            assert_eq!(
                bump_for_commit(commit_type, true, &rules),
                BumpType::Major,
                "breaking '{}' must resolve to major",
                commit_type
            );
        }
    }

    #[test]
    fn test_mapped_commit_type() {
        let rules = rules();
        assert_eq!(bump_for_commit("feat", false, &rules), BumpType::Minor);
        assert_eq!(bump_for_commit("fix", false, &rules), BumpType::Patch);
    }

    #[test]
    fn test_ignored_commit_type_contributes_nothing() {
        let rules = rules();
        assert_eq!(rules.commit_types.get("docs"), Some(&CommitBump::Ignore));
        assert_eq!(bump_for_commit("docs", false, &rules), BumpType::None);
    }

    #[test]
    fn test_unknown_commit_type_uses_default() {
        let mut config = Config::default();
        config.default_bump = "patch".to_string();
        let rules = config.validate().unwrap();
        assert_eq!(bump_for_commit("wizardry", false, &rules), BumpType::Patch);
    }

    #[test]
    fn test_malformed_commit_uses_default() {
        let mut config = Config::default();
        config.default_bump = "patch".to_string();
        let rules = config.validate().unwrap();
        // Malformed headers are classified with an empty type
        assert_eq!(bump_for_commit("", false, &rules), BumpType::Patch);
    }

    #[test]
    fn test_none_never_cascades() {
        let rules = rules().dependency_rules;
        assert_eq!(bump_for_dependency(BumpType::None, &rules), BumpType::None);
    }

    #[test]
    fn test_dependency_rule_selection() {
        let rules = DependencyRules {
            on_major: BumpType::Major,
            on_minor: BumpType::Patch,
            on_patch: BumpType::None,
        };
        assert_eq!(bump_for_dependency(BumpType::Major, &rules), BumpType::Major);
        assert_eq!(bump_for_dependency(BumpType::Minor, &rules), BumpType::Patch);
        assert_eq!(bump_for_dependency(BumpType::Patch, &rules), BumpType::None);
    }
}
