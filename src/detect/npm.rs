use crate::config::NpmAdapterConfig;
use crate::detect::ModuleDetector;
use crate::domain::{Module, ProjectInformation, Version};
use crate::error::{MonoBumpError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Reads npm workspaces.
///
/// The root package.json lists workspace directories (plain paths or
/// single-level `dir/*` globs); each workspace's package.json supplies
/// name, version and dependencies. Module ids are package names, and
/// dependency edges are the dependencies that name another workspace.
pub struct NpmDetector {
    config: NpmAdapterConfig,
}

struct Manifest {
    name: Option<String>,
    version: Option<Version>,
    dependencies: Vec<String>,
}

impl NpmDetector {
    pub fn new(config: NpmAdapterConfig) -> Self {
        NpmDetector { config }
    }

    fn read_manifest(&self, dir: &Path) -> Result<serde_json::Value> {
        let raw = fs::read_to_string(dir.join("package.json"))?;
        serde_json::from_str(&raw).map_err(|e| {
            MonoBumpError::detect(format!(
                "invalid package.json in '{}': {}",
                dir.display(),
                e
            ))
        })
    }

    fn manifest_fields(&self, manifest: &serde_json::Value) -> Manifest {
        let name = manifest
            .get("name")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        let version = manifest
            .get("version")
            .and_then(|v| v.as_str())
            .and_then(|v| Version::parse(v).ok());

        let mut dependencies = Vec::new();
        let mut sections = vec!["dependencies"];
        if self.config.include_dev_dependencies {
            sections.push("devDependencies");
        }
        for section in sections {
            if let Some(map) = manifest.get(section).and_then(|v| v.as_object()) {
                dependencies.extend(map.keys().cloned());
            }
        }

        Manifest {
            name,
            version,
            dependencies,
        }
    }

    /// Workspace entries from either the array form or the yarn-style
    /// `{ "packages": [...] }` object
    fn workspace_patterns(manifest: &serde_json::Value) -> Vec<String> {
        let entries = match manifest.get("workspaces") {
            Some(serde_json::Value::Array(entries)) => entries.clone(),
            Some(serde_json::Value::Object(map)) => map
                .get("packages")
                .and_then(|v| v.as_array())
                .cloned()
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        entries
            .into_iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect()
    }

    /// Expand `dir/*` globs into the directories that contain a
    /// package.json; plain entries are taken as-is
    fn expand_patterns(root: &Path, patterns: &[String]) -> Vec<String> {
        let mut paths = Vec::new();
        for pattern in patterns {
            if let Some(parent) = pattern.strip_suffix("/*") {
                let Ok(entries) = fs::read_dir(root.join(parent)) else {
                    continue;
                };
                let mut found = Vec::new();
                for entry in entries.flatten() {
                    if entry.path().join("package.json").is_file() {
                        found.push(format!(
                            "{}/{}",
                            parent,
                            entry.file_name().to_string_lossy()
                        ));
                    }
                }
                found.sort();
                paths.extend(found);
            } else if root.join(pattern).join("package.json").is_file() {
                paths.push(pattern.clone());
            }
        }
        paths
    }
}

impl ModuleDetector for NpmDetector {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn matches(&self, root: &Path) -> bool {
        root.join("package.json").is_file()
    }

    fn read_project(&self, root: &Path) -> Result<ProjectInformation> {
        let root_manifest = self.read_manifest(root)?;
        let root_fields = self.manifest_fields(&root_manifest);

        let root_id = root_fields.name.clone().unwrap_or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "root".to_string())
        });

        // First pass: load every workspace manifest
        let mut workspaces = Vec::new();
        let patterns = Self::workspace_patterns(&root_manifest);
        for path in Self::expand_patterns(root, &patterns) {
            let manifest = self.read_manifest(&root.join(&path))?;
            let fields = self.manifest_fields(&manifest);
            let Some(name) = fields.name.clone() else {
                continue;
            };
            workspaces.push((name, path, fields));
        }

        // Second pass: edges are dependencies naming another workspace
        let workspace_names: BTreeSet<String> =
            workspaces.iter().map(|(name, _, _)| name.clone()).collect();

        let mut project = ProjectInformation::new("npm");

        let mut root_module = Module::root(root_id);
        root_module.declared_version = root_fields.version;
        for dependency in &root_fields.dependencies {
            if workspace_names.contains(dependency) {
                root_module.dependencies.insert(dependency.clone());
            }
        }
        project.modules.push(root_module);

        for (name, path, fields) in workspaces {
            let mut module = Module::new(name, path);
            module.declared_version = fields.version;
            for dependency in fields.dependencies {
                if workspace_names.contains(&dependency) {
                    module.dependencies.insert(dependency);
                }
            }
            project.modules.push(module);
        }

        Ok(project)
    }
}
