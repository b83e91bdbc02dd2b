use crate::domain::{Module, Version};
use crate::error::Result;
use crate::update::VersionUpdateStrategy;
use std::fs;
use std::path::Path;

/// Rewrites the `version=` entry of a module's gradle.properties,
/// creating the file when the module has none yet.
pub struct GradlePropertiesStrategy;

impl GradlePropertiesStrategy {
    pub fn new() -> Self {
        GradlePropertiesStrategy
    }

    fn rewrite(content: &str, version: &Version) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut replaced = false;

        for line in content.lines() {
            if line.trim_start().starts_with("version=") && !replaced {
                lines.push(format!("version={}", version));
                replaced = true;
            } else {
                lines.push(line.to_string());
            }
        }

        if !replaced {
            lines.push(format!("version={}", version));
        }

        let mut rewritten = lines.join("\n");
        rewritten.push('\n');
        rewritten
    }
}

impl Default for GradlePropertiesStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionUpdateStrategy for GradlePropertiesStrategy {
    fn name(&self) -> &'static str {
        "gradle"
    }

    fn write_version(&self, root: &Path, module: &Module, version: &Version) -> Result<()> {
        let properties_path = root.join(&module.path).join("gradle.properties");
        let content = fs::read_to_string(&properties_path).unwrap_or_default();
        fs::write(&properties_path, Self::rewrite(&content, version))?;
        Ok(())
    }
}
