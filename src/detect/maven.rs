use crate::detect::ModuleDetector;
use crate::domain::{Module, ProjectInformation, Version};
use crate::error::{MonoBumpError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Reads Maven multi-module builds.
///
/// Modules come from the `<modules>` section of the root pom; coordinates
/// and versions from each module's own pom, inheriting group and version
/// from the root when absent. Dependency edges are `<dependency>` entries
/// whose artifactId names a sibling module. Module ids are artifactIds.
///
/// Extraction is line-oriented and pragmatic; it covers the element
/// shapes poms use in practice without pulling in an XML parser.
pub struct MavenDetector;

impl MavenDetector {
    pub fn new() -> Self {
        MavenDetector
    }

    /// Byte span of the `<parent>` block, when present
    fn parent_span(content: &str) -> Option<(usize, usize)> {
        let start = content.find("<parent>")?;
        let end = content[start..].find("</parent>")?;
        Some((start, start + end + "</parent>".len()))
    }

    /// First `<tag>value</tag>` occurrence outside the parent block
    fn extract_own(content: &str, tag: &str) -> Option<String> {
        let re = Regex::new(&format!(r"<{}>\s*([^<]+?)\s*</{}>", tag, tag)).ok()?;
        let parent = Self::parent_span(content);
        re.captures_iter(content)
            .filter(|c| {
                let m = match c.get(0) {
                    Some(m) => m,
                    None => return false,
                };
                match parent {
                    Some((start, end)) => m.start() < start || m.start() >= end,
                    None => true,
                }
            })
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
            .next()
    }

    /// First `<tag>value</tag>` occurrence inside the parent block
    fn extract_parent(content: &str, tag: &str) -> Option<String> {
        let (start, end) = Self::parent_span(content)?;
        let re = Regex::new(&format!(r"<{}>\s*([^<]+?)\s*</{}>", tag, tag)).ok()?;
        re.captures(&content[start..end])
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn list_modules(content: &str) -> Vec<String> {
        let re = match Regex::new(r"<module>\s*([^<]+?)\s*</module>") {
            Ok(re) => re,
            Err(_) => return Vec::new(),
        };
        re.captures_iter(content)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// (groupId, artifactId) of each `<dependency>` entry
    fn list_dependencies(content: &str) -> Vec<(Option<String>, String)> {
        let block_re = match Regex::new(r"(?s)<dependency>(.*?)</dependency>") {
            Ok(re) => re,
            Err(_) => return Vec::new(),
        };
        let mut dependencies = Vec::new();
        for block in block_re.captures_iter(content) {
            let Some(body) = block.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if let Some(artifact) = Self::extract_own(body, "artifactId") {
                dependencies.push((Self::extract_own(body, "groupId"), artifact));
            }
        }
        dependencies
    }

    /// Slice of the pom before the dependency/build sections, where the
    /// project coordinates live. Keeps coordinate extraction from picking
    /// up a dependency's `<version>` element.
    fn preamble(content: &str) -> &str {
        let cut = ["<dependencies>", "<dependencyManagement>", "<build>"]
            .iter()
            .filter_map(|marker| content.find(marker))
            .min()
            .unwrap_or(content.len());
        &content[..cut]
    }

    /// Coordinates of a pom, inheriting group/version from the parent
    /// block when the project does not declare its own
    fn coordinates(content: &str) -> (Option<String>, Option<String>, Option<String>) {
        let preamble = Self::preamble(content);
        let group = Self::extract_own(preamble, "groupId")
            .or_else(|| Self::extract_parent(preamble, "groupId"));
        let artifact = Self::extract_own(preamble, "artifactId");
        let version = Self::extract_own(preamble, "version")
            .or_else(|| Self::extract_parent(preamble, "version"));
        (group, artifact, version)
    }
}

impl Default for MavenDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleDetector for MavenDetector {
    fn name(&self) -> &'static str {
        "maven"
    }

    fn matches(&self, root: &Path) -> bool {
        root.join("pom.xml").is_file()
    }

    fn read_project(&self, root: &Path) -> Result<ProjectInformation> {
        let root_pom = fs::read_to_string(root.join("pom.xml")).map_err(|_| {
            MonoBumpError::detect(format!("no pom.xml found in '{}'", root.display()))
        })?;

        let (root_group, root_artifact, root_version) = Self::coordinates(&root_pom);
        let root_id = root_artifact.clone().unwrap_or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "root".to_string())
        });

        let mut project = ProjectInformation::new("maven");

        let mut root_module = Module::root(root_id);
        root_module.declared_version = root_version
            .as_deref()
            .and_then(|v| Version::parse(v).ok());
        if let Some(group) = &root_group {
            root_module = root_module.with_attribute("maven.group_id", group.clone());
        }
        if let Some(artifact) = &root_artifact {
            root_module = root_module.with_attribute("maven.artifact_id", artifact.clone());
        }

        // First pass: read every module pom
        struct RawModule {
            id: String,
            path: String,
            group: Option<String>,
            version: Option<String>,
            parent_artifact: Option<String>,
            dependencies: Vec<(Option<String>, String)>,
        }

        let mut raw_modules = Vec::new();
        for relative in Self::list_modules(&root_pom) {
            let pom_path = root.join(&relative).join("pom.xml");
            let pom = match fs::read_to_string(&pom_path) {
                Ok(pom) => pom,
                Err(_) => continue,
            };

            let (group, artifact, version) = Self::coordinates(&pom);
            let Some(artifact) = artifact else {
                continue;
            };
            raw_modules.push(RawModule {
                id: artifact,
                path: relative,
                group: group.or_else(|| root_group.clone()),
                version: version.or_else(|| root_version.clone()),
                parent_artifact: Self::extract_parent(&pom, "artifactId"),
                dependencies: Self::list_dependencies(&pom),
            });
        }

        // Second pass: keep only dependency edges that name sibling modules
        let sibling_ids: Vec<String> = raw_modules.iter().map(|m| m.id.clone()).collect();

        for raw in raw_modules {
            let mut module = Module::new(raw.id.clone(), raw.path);
            module.declared_version = raw
                .version
                .as_deref()
                .and_then(|v| Version::parse(v).ok());
            if let Some(group) = &raw.group {
                module = module.with_attribute("maven.group_id", group.clone());
            }
            module = module.with_attribute("maven.artifact_id", raw.id.clone());
            if let Some(parent) = &raw.parent_artifact {
                module = module.with_attribute("maven.parent_artifact_id", parent.clone());
            }

            for (dep_group, dep_artifact) in raw.dependencies {
                if !sibling_ids.contains(&dep_artifact) {
                    continue;
                }
                // Same-group check when both sides declare a literal group
                let group_matches = match (&dep_group, &raw.group) {
                    (Some(dep), Some(own)) => dep == own || dep.starts_with("${"),
                    _ => true,
                };
                if group_matches {
                    module.dependencies.insert(dep_artifact);
                }
            }

            project.modules.push(module);
        }

        project.modules.insert(0, root_module);
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0"?>
<project>
  <parent>
    <groupId>com.acme</groupId>
    <artifactId>acme-parent</artifactId>
    <version>1.4.0</version>
  </parent>
  <artifactId>acme-core</artifactId>
  <dependencies>
    <dependency>
      <groupId>com.acme</groupId>
      <artifactId>acme-util</artifactId>
      <version>1.4.0</version>
    </dependency>
    <dependency>
      <groupId>org.slf4j</groupId>
      <artifactId>slf4j-api</artifactId>
    </dependency>
  </dependencies>
</project>
"#;

    #[test]
    fn test_coordinates_inherit_from_parent() {
        let (group, artifact, version) = MavenDetector::coordinates(POM);
        assert_eq!(group, Some("com.acme".to_string()));
        assert_eq!(artifact, Some("acme-core".to_string()));
        assert_eq!(version, Some("1.4.0".to_string()));
    }

    #[test]
    fn test_inherited_version_ignores_dependency_versions() {
        // No own <version>; the dependency's version must not leak in
        let pom = r#"
<project>
  <parent>
    <groupId>com.acme</groupId>
    <artifactId>acme-parent</artifactId>
    <version>2.1.0</version>
  </parent>
  <artifactId>acme-core</artifactId>
  <dependencies>
    <dependency>
      <groupId>org.slf4j</groupId>
      <artifactId>slf4j-api</artifactId>
      <version>9.9.9</version>
    </dependency>
  </dependencies>
</project>
"#;
        let (_, _, version) = MavenDetector::coordinates(pom);
        assert_eq!(version, Some("2.1.0".to_string()));
    }

    #[test]
    fn test_own_version_wins_over_parent() {
        let pom = r#"
<project>
  <parent>
    <groupId>com.acme</groupId>
    <artifactId>acme-parent</artifactId>
    <version>1.4.0</version>
  </parent>
  <artifactId>acme-core</artifactId>
  <version>2.0.0</version>
</project>
"#;
        let (_, _, version) = MavenDetector::coordinates(pom);
        assert_eq!(version, Some("2.0.0".to_string()));
    }

    #[test]
    fn test_list_modules() {
        let pom = r#"
<project>
  <modules>
    <module>core</module>
    <module>util</module>
  </modules>
</project>
"#;
        assert_eq!(MavenDetector::list_modules(pom), vec!["core", "util"]);
    }

    #[test]
    fn test_list_dependencies() {
        let dependencies = MavenDetector::list_dependencies(POM);
        assert_eq!(dependencies.len(), 2);
        assert_eq!(dependencies[0].1, "acme-util");
        assert_eq!(dependencies[1].1, "slf4j-api");
    }
}
