use crate::domain::Version;

/// A release tag, optionally scoped to a module.
///
/// Module-scoped tags are named `{module}-v{version}`; tags for the
/// repository root are plain `v{version}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub module: Option<String>,
    pub version: Option<Version>,
}

impl Tag {
    /// Tag for the repository root (e.g. "v1.2.3")
    pub fn for_root(version: Version) -> Self {
        Tag {
            name: format!("v{}", version),
            module: None,
            version: Some(version),
        }
    }

    /// Tag scoped to a module (e.g. "core-v1.2.3")
    pub fn for_module(module: impl Into<String>, version: Version) -> Self {
        let module = module.into();
        Tag {
            name: format!("{}-v{}", module, version),
            module: Some(module),
            version: Some(version),
        }
    }

    /// Parse an existing tag name, extracting module scope and version
    /// when present.
    ///
    /// Names that carry neither a recognizable version nor a module scope
    /// still produce a Tag; both fields stay `None`.
    pub fn parse(name: impl Into<String>) -> Self {
        let name = name.into();

        // Module-scoped form: everything before the last "-v" delimiter
        if let Some(idx) = name.rfind("-v") {
            if let Ok(version) = Version::parse(&name[idx + 2..]) {
                return Tag {
                    module: Some(name[..idx].to_string()),
                    version: Some(version),
                    name,
                };
            }
        }

        let version = Version::parse(&name).ok();
        Tag {
            module: None,
            version,
            name,
        }
    }

    /// Whether this tag belongs to the given module scope (`None` = root)
    pub fn matches_module(&self, module: Option<&str>) -> bool {
        self.module.as_deref() == module
    }
}
