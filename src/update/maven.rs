use crate::config::MavenAdapterConfig;
use crate::domain::{Module, Version};
use crate::error::{MonoBumpError, Result};
use crate::update::VersionUpdateStrategy;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Rewrites `<version>` elements in a module's pom.xml.
///
/// The project's own version is the first `<version>` element outside the
/// `<parent>` block and before the `<dependencies>` section; the parent
/// reference is the `<version>` element inside `<parent>`. Rewrites
/// splice the element in place, leaving the rest of the file untouched.
pub struct MavenPomStrategy {
    config: MavenAdapterConfig,
}

impl MavenPomStrategy {
    pub fn new(config: MavenAdapterConfig) -> Self {
        MavenPomStrategy { config }
    }

    fn parent_span(content: &str) -> Option<(usize, usize)> {
        let start = content.find("<parent>")?;
        let end = content[start..].find("</parent>")?;
        Some((start, start + end + "</parent>".len()))
    }

    fn replace_project_version(content: &str, version: &Version) -> Result<String> {
        let re = Regex::new(r"<version>[^<]*</version>")
            .map_err(|e| MonoBumpError::update(e.to_string()))?;
        let parent = Self::parent_span(content);
        let search_end = content.find("<dependencies>").unwrap_or(content.len());

        for m in re.find_iter(content) {
            if m.start() >= search_end {
                break;
            }
            if let Some((start, end)) = parent {
                if m.start() >= start && m.start() < end {
                    continue;
                }
            }
            let mut rewritten = String::with_capacity(content.len());
            rewritten.push_str(&content[..m.start()]);
            rewritten.push_str(&format!("<version>{}</version>", version));
            rewritten.push_str(&content[m.end()..]);
            return Ok(rewritten);
        }

        Err(MonoBumpError::update(
            "pom.xml declares no project <version> element".to_string(),
        ))
    }

    fn replace_parent_version(content: &str, version: &Version) -> Result<String> {
        let (start, end) = Self::parent_span(content).ok_or_else(|| {
            MonoBumpError::update("pom.xml has no <parent> block".to_string())
        })?;
        let re = Regex::new(r"<version>[^<]*</version>")
            .map_err(|e| MonoBumpError::update(e.to_string()))?;

        let Some(m) = re.find(&content[start..end]) else {
            return Err(MonoBumpError::update(
                "<parent> block declares no <version> element".to_string(),
            ));
        };

        let mut rewritten = String::with_capacity(content.len());
        rewritten.push_str(&content[..start + m.start()]);
        rewritten.push_str(&format!("<version>{}</version>", version));
        rewritten.push_str(&content[start + m.end()..]);
        Ok(rewritten)
    }
}

impl VersionUpdateStrategy for MavenPomStrategy {
    fn name(&self) -> &'static str {
        "maven"
    }

    fn write_version(&self, root: &Path, module: &Module, version: &Version) -> Result<()> {
        let pom_path = root.join(&module.path).join("pom.xml");
        let content = fs::read_to_string(&pom_path)?;
        fs::write(&pom_path, Self::replace_project_version(&content, version)?)?;
        Ok(())
    }

    fn write_parent_version(&self, root: &Path, module: &Module, version: &Version) -> Result<()> {
        if !self.config.update_parent_version {
            return Ok(());
        }
        let pom_path = root.join(&module.path).join("pom.xml");
        let content = fs::read_to_string(&pom_path)?;
        fs::write(&pom_path, Self::replace_parent_version(&content, version)?)?;
        Ok(())
    }
}
