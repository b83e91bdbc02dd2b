use crate::domain::{BumpType, CommitBump};
use crate::error::{MonoBumpError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Represents the complete configuration for mono-bump.
///
/// Holds the commit-type table, the dependency cascade rules and optional
/// adapter-specific blocks. Values are kept as raw strings until
/// [Config::validate] converts them into typed [BumpRules]; validation is
/// fail-fast and runs once per invocation, before any commit or graph
/// processing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_default_bump")]
    pub default_bump: String,

    #[serde(default = "default_commit_types")]
    pub commit_types: HashMap<String, String>,

    #[serde(default)]
    pub dependency_rules: DependencyRulesConfig,

    #[serde(default)]
    pub adapters: AdaptersConfig,
}

/// Returns the default bump applied to commit types without a mapping.
fn default_default_bump() -> String {
    "none".to_string()
}

/// Returns the default commit-type table.
fn default_commit_types() -> HashMap<String, String> {
    let mut map = HashMap::new();
    map.insert("feat".to_string(), "minor".to_string());
    map.insert("fix".to_string(), "patch".to_string());
    map.insert("perf".to_string(), "patch".to_string());
    map.insert("refactor".to_string(), "patch".to_string());
    map.insert("docs".to_string(), "ignore".to_string());
    map.insert("style".to_string(), "ignore".to_string());
    map.insert("test".to_string(), "ignore".to_string());
    map.insert("chore".to_string(), "ignore".to_string());
    map.insert("build".to_string(), "ignore".to_string());
    map.insert("ci".to_string(), "ignore".to_string());
    map
}

/// Raw cascade rules: the bump a dependent receives for each bump level
/// of one of its dependencies.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DependencyRulesConfig {
    #[serde(default = "default_on_major")]
    pub on_major_of_dependency: String,

    #[serde(default = "default_on_minor")]
    pub on_minor_of_dependency: String,

    #[serde(default = "default_on_patch")]
    pub on_patch_of_dependency: String,
}

fn default_on_major() -> String {
    "major".to_string()
}

fn default_on_minor() -> String {
    "minor".to_string()
}

fn default_on_patch() -> String {
    "patch".to_string()
}

impl Default for DependencyRulesConfig {
    fn default() -> Self {
        DependencyRulesConfig {
            on_major_of_dependency: default_on_major(),
            on_minor_of_dependency: default_on_minor(),
            on_patch_of_dependency: default_on_patch(),
        }
    }
}

/// Adapter-specific configuration blocks
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct AdaptersConfig {
    #[serde(default)]
    pub npm: NpmAdapterConfig,

    #[serde(default)]
    pub maven: MavenAdapterConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NpmAdapterConfig {
    /// Treat devDependencies as dependency edges between workspaces
    #[serde(default = "default_true")]
    pub include_dev_dependencies: bool,
}

impl Default for NpmAdapterConfig {
    fn default() -> Self {
        NpmAdapterConfig {
            include_dev_dependencies: default_true(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MavenAdapterConfig {
    /// Rewrite `<parent><version>` in module poms when the root bumps
    #[serde(default = "default_true")]
    pub update_parent_version: bool,
}

impl Default for MavenAdapterConfig {
    fn default() -> Self {
        MavenAdapterConfig {
            update_parent_version: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_bump: default_default_bump(),
            commit_types: default_commit_types(),
            dependency_rules: DependencyRulesConfig::default(),
            adapters: AdaptersConfig::default(),
        }
    }
}

/// Validated bump rules: the immutable input of the bump resolvers.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpRules {
    pub default_bump: CommitBump,
    pub commit_types: HashMap<String, CommitBump>,
    pub dependency_rules: DependencyRules,
}

/// Typed cascade rules, `ignore` structurally excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyRules {
    pub on_major: BumpType,
    pub on_minor: BumpType,
    pub on_patch: BumpType,
}

impl Default for DependencyRules {
    fn default() -> Self {
        DependencyRules {
            on_major: BumpType::Major,
            on_minor: BumpType::Minor,
            on_patch: BumpType::Patch,
        }
    }
}

impl Config {
    /// Structurally validate the configuration, failing on the first
    /// violation.
    ///
    /// `default_bump` and every `commit_types` value must be one of
    /// `major`, `minor`, `patch`, `none` or `ignore`. The three
    /// `dependency_rules` fields additionally reject `ignore`: a cascade
    /// rule must always resolve to an actionable-or-no-op bump.
    pub fn validate(&self) -> Result<BumpRules> {
        let default_bump = CommitBump::parse(&self.default_bump)
            .map_err(|_| MonoBumpError::config(format!(
                "invalid default_bump '{}'",
                self.default_bump
            )))?;

        let mut commit_types = HashMap::new();
        for (commit_type, raw) in &self.commit_types {
            let parsed = CommitBump::parse(raw).map_err(|_| {
                MonoBumpError::config(format!(
                    "invalid bump '{}' for commit type '{}'",
                    raw, commit_type
                ))
            })?;
            commit_types.insert(commit_type.clone(), parsed);
        }

        let dependency_rules = DependencyRules {
            on_major: parse_dependency_rule(
                "on_major_of_dependency",
                &self.dependency_rules.on_major_of_dependency,
            )?,
            on_minor: parse_dependency_rule(
                "on_minor_of_dependency",
                &self.dependency_rules.on_minor_of_dependency,
            )?,
            on_patch: parse_dependency_rule(
                "on_patch_of_dependency",
                &self.dependency_rules.on_patch_of_dependency,
            )?,
        };

        Ok(BumpRules {
            default_bump,
            commit_types,
            dependency_rules,
        })
    }
}

fn parse_dependency_rule(field: &str, raw: &str) -> Result<BumpType> {
    if raw == "ignore" {
        return Err(MonoBumpError::config(format!(
            "'ignore' is not a valid value for {} - use none for a no-op",
            field
        )));
    }
    BumpType::parse(raw)
        .map_err(|_| MonoBumpError::config(format!("invalid bump '{}' for {}", raw, field)))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `monobump.toml` in current directory
/// 3. `~/.config/.monobump.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./monobump.toml").exists() {
        fs::read_to_string("./monobump.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".monobump.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| MonoBumpError::config(e.to_string()))?;
    Ok(config)
}
