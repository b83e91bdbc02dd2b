//! Strategies that persist computed versions back into build manifests.

pub mod gradle;
pub mod maven;
pub mod npm;

pub use gradle::GradlePropertiesStrategy;
pub use maven::MavenPomStrategy;
pub use npm::PackageJsonStrategy;

use crate::config::Config;
use crate::domain::{Module, Version};
use crate::error::{MonoBumpError, Result};
use std::path::Path;

/// Writes a module's new version into its build manifest
pub trait VersionUpdateStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Persist `version` as the module's declared version
    fn write_version(&self, root: &Path, module: &Module, version: &Version) -> Result<()>;

    /// Update the module's reference to its parent's version, for build
    /// systems that track one. No-op by default.
    fn write_parent_version(
        &self,
        _root: &Path,
        _module: &Module,
        _version: &Version,
    ) -> Result<()> {
        Ok(())
    }
}

/// The writer matching a detector adapter
pub fn strategy_for(adapter: &str, config: &Config) -> Result<Box<dyn VersionUpdateStrategy>> {
    match adapter {
        "gradle" => Ok(Box::new(GradlePropertiesStrategy::new())),
        "maven" => Ok(Box::new(MavenPomStrategy::new(
            config.adapters.maven.clone(),
        ))),
        "npm" => Ok(Box::new(PackageJsonStrategy::new())),
        other => Err(MonoBumpError::update(format!(
            "no version writer for adapter '{}'",
            other
        ))),
    }
}
