//! Build-system adapters that read build files and assemble the project
//! snapshot consumed by the module registry.
//!
//! Each adapter implements [ModuleDetector]; the [DetectorRegistry] is
//! built once at startup and resolves either an explicit selection or the
//! first adapter whose marker files are present.

pub mod gradle;
pub mod maven;
pub mod npm;

pub use gradle::GradleDetector;
pub use maven::MavenDetector;
pub use npm::NpmDetector;

use crate::config::Config;
use crate::domain::ProjectInformation;
use crate::error::{MonoBumpError, Result};
use std::path::Path;

/// Capability interface of one build-system adapter
pub trait ModuleDetector: Send + Sync {
    /// Adapter id used for explicit selection (e.g. "gradle")
    fn name(&self) -> &'static str;

    /// Cheap marker-file check used for auto-detection
    fn matches(&self, root: &Path) -> bool;

    /// Read the build files under `root` and assemble the snapshot
    fn read_project(&self, root: &Path) -> Result<ProjectInformation>;
}

/// All known adapters, built once per run
pub struct DetectorRegistry {
    detectors: Vec<Box<dyn ModuleDetector>>,
}

impl DetectorRegistry {
    pub fn from_config(config: &Config) -> Self {
        DetectorRegistry {
            detectors: vec![
                Box::new(GradleDetector::new()),
                Box::new(MavenDetector::new()),
                Box::new(NpmDetector::new(config.adapters.npm.clone())),
            ],
        }
    }

    /// Adapter ids, in probe order
    pub fn supported(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn ModuleDetector> {
        self.detectors
            .iter()
            .find(|d| d.name() == name)
            .map(|d| d.as_ref())
    }

    /// Resolve an explicit adapter selection, or probe marker files when
    /// none was given. Failure is fatal and lists the supported adapters.
    pub fn resolve(&self, selection: Option<&str>, root: &Path) -> Result<&dyn ModuleDetector> {
        match selection {
            Some(name) => self.get(name).ok_or_else(|| {
                MonoBumpError::detect(format!(
                    "unsupported adapter '{}' - supported adapters: {}",
                    name,
                    self.supported().join(", ")
                ))
            }),
            None => self
                .detectors
                .iter()
                .find(|d| d.matches(root))
                .map(|d| d.as_ref())
                .ok_or_else(|| {
                    MonoBumpError::detect(format!(
                        "could not auto-detect a build system in '{}' - supported adapters: {}",
                        root.display(),
                        self.supported().join(", ")
                    ))
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_adapters() {
        let registry = DetectorRegistry::from_config(&Config::default());
        assert_eq!(registry.supported(), vec!["gradle", "maven", "npm"]);
    }

    #[test]
    fn test_unknown_adapter_lists_supported() {
        let registry = DetectorRegistry::from_config(&Config::default());
        let err = registry
            .resolve(Some("bazel"), Path::new("."))
            .map(|d| d.name())
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("bazel"));
        assert!(msg.contains("gradle, maven, npm"));
    }

    #[test]
    fn test_auto_detect_failure_lists_supported() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DetectorRegistry::from_config(&Config::default());
        let err = registry
            .resolve(None, dir.path())
            .map(|d| d.name())
            .unwrap_err();
        assert!(err.to_string().contains("gradle, maven, npm"));
    }
}
