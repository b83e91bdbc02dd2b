use crate::detect::ModuleDetector;
use crate::domain::{Module, ProjectInformation, Version};
use crate::error::{MonoBumpError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads Gradle multi-project builds.
///
/// Modules come from the `include` statements of `settings.gradle` (or
/// `settings.gradle.kts`); versions from `version=` entries in
/// `gradle.properties`; dependency edges from `project(':x')` references
/// in each module's build script. Module ids use directory notation
/// (`libs/util` for the Gradle path `:libs:util`); the original Gradle
/// path is kept as an attribute for downstream writers.
pub struct GradleDetector;

impl GradleDetector {
    pub fn new() -> Self {
        GradleDetector
    }

    fn settings_file(root: &Path) -> Option<PathBuf> {
        for name in ["settings.gradle", "settings.gradle.kts"] {
            let candidate = root.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }

    fn build_file(dir: &Path) -> Option<PathBuf> {
        for name in ["build.gradle", "build.gradle.kts"] {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }

    /// Version from a `version=` entry in the directory's gradle.properties
    fn read_version(dir: &Path) -> Option<Version> {
        let content = fs::read_to_string(dir.join("gradle.properties")).ok()?;
        for line in content.lines() {
            if let Some(raw) = line.strip_prefix("version=") {
                return Version::parse(raw.trim()).ok();
            }
        }
        None
    }

    fn root_project_name(settings: &str, root: &Path) -> String {
        Regex::new(r#"rootProject\.name\s*=\s*['"]([^'"]+)['"]"#)
            .ok()
            .and_then(|re| re.captures(settings))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| {
                root.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "root".to_string())
            })
    }

    /// Gradle paths of the included projects, without the leading colon
    fn parse_includes(settings: &str) -> Vec<String> {
        let mut includes = Vec::new();
        let token = match Regex::new(r#"['"]:?([A-Za-z0-9_.:-]+)['"]"#) {
            Ok(re) => re,
            Err(_) => return includes,
        };

        for line in settings.lines() {
            let trimmed = line.trim_start();
            // includeBuild() pulls in composite builds, not modules
            if !trimmed.starts_with("include") || trimmed.starts_with("includeBuild") {
                continue;
            }
            for captures in token.captures_iter(trimmed) {
                if let Some(m) = captures.get(1) {
                    includes.push(m.as_str().to_string());
                }
            }
        }

        includes
    }

    /// Ids of sibling projects referenced as `project(':x')`, converted
    /// to directory notation
    fn parse_project_dependencies(build_script: &str) -> Vec<String> {
        let re = match Regex::new(r#"project\s*\(\s*['"]:([A-Za-z0-9_.:-]+)['"]\s*\)"#) {
            Ok(re) => re,
            Err(_) => return Vec::new(),
        };
        re.captures_iter(build_script)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().replace(':', "/"))
            .collect()
    }

    fn dependencies_of(dir: &Path) -> Vec<String> {
        Self::build_file(dir)
            .and_then(|path| fs::read_to_string(path).ok())
            .map(|script| Self::parse_project_dependencies(&script))
            .unwrap_or_default()
    }
}

impl Default for GradleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleDetector for GradleDetector {
    fn name(&self) -> &'static str {
        "gradle"
    }

    fn matches(&self, root: &Path) -> bool {
        Self::settings_file(root).is_some()
    }

    fn read_project(&self, root: &Path) -> Result<ProjectInformation> {
        let settings_path = Self::settings_file(root).ok_or_else(|| {
            MonoBumpError::detect(format!("no settings.gradle found in '{}'", root.display()))
        })?;
        let settings = fs::read_to_string(settings_path)?;

        let mut project = ProjectInformation::new("gradle");

        let root_version = Self::read_version(root);
        let mut root_module = Module::root(Self::root_project_name(&settings, root));
        root_module.declared_version = root_version;
        for dependency in Self::dependencies_of(root) {
            root_module.dependencies.insert(dependency);
        }
        project.modules.push(root_module);

        for include in Self::parse_includes(&settings) {
            let relative = include.replace(':', "/");
            let dir = root.join(&relative);

            let mut module = Module::new(relative.clone(), relative)
                .with_attribute("gradle.project_path", format!(":{}", include));
            module.declared_version = Self::read_version(&dir).or(root_version);
            for dependency in Self::dependencies_of(&dir) {
                module.dependencies.insert(dependency);
            }
            project.modules.push(module);
        }

        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_includes_groovy() {
        let settings = r#"
rootProject.name = 'acme'
include ':core', ':libs:util'
include ':app'
"#;
        assert_eq!(
            GradleDetector::parse_includes(settings),
            vec!["core", "libs:util", "app"]
        );
    }

    #[test]
    fn test_parse_includes_kotlin() {
        let settings = r#"
rootProject.name = "acme"
include(":core", ":app")
"#;
        assert_eq!(
            GradleDetector::parse_includes(settings),
            vec!["core", "app"]
        );
    }

    #[test]
    fn test_include_build_is_not_a_module() {
        let settings = "includeBuild(\"build-logic\")\ninclude ':core'\n";
        assert_eq!(GradleDetector::parse_includes(settings), vec!["core"]);
    }

    #[test]
    fn test_root_project_name_fallback() {
        let name = GradleDetector::root_project_name("", Path::new("/tmp/acme"));
        assert_eq!(name, "acme");
    }

    #[test]
    fn test_parse_project_dependencies() {
        let build = r#"
dependencies {
    implementation project(':core')
    api project(":libs:util")
    implementation 'org.slf4j:slf4j-api:2.0.0'
}
"#;
        assert_eq!(
            GradleDetector::parse_project_dependencies(build),
            vec!["core", "libs/util"]
        );
    }
}
