use crate::domain::{Module, Version};
use crate::error::{MonoBumpError, Result};
use crate::update::VersionUpdateStrategy;
use std::fs;
use std::path::Path;

/// Rewrites the `version` field of a module's package.json
pub struct PackageJsonStrategy;

impl PackageJsonStrategy {
    pub fn new() -> Self {
        PackageJsonStrategy
    }

    fn rewrite(content: &str, version: &Version) -> Result<String> {
        let mut manifest: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| MonoBumpError::update(format!("invalid package.json: {}", e)))?;

        let object = manifest
            .as_object_mut()
            .ok_or_else(|| MonoBumpError::update("package.json is not an object".to_string()))?;
        object.insert(
            "version".to_string(),
            serde_json::Value::String(version.to_string()),
        );

        let mut rewritten = serde_json::to_string_pretty(&manifest)
            .map_err(|e| MonoBumpError::update(e.to_string()))?;
        rewritten.push('\n');
        Ok(rewritten)
    }
}

impl Default for PackageJsonStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionUpdateStrategy for PackageJsonStrategy {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn write_version(&self, root: &Path, module: &Module, version: &Version) -> Result<()> {
        let manifest_path = root.join(&module.path).join("package.json");
        let content = fs::read_to_string(&manifest_path)?;
        fs::write(&manifest_path, Self::rewrite(&content, version)?)?;
        Ok(())
    }
}
