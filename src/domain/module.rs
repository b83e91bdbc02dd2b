use crate::domain::Version;
use std::collections::{BTreeSet, HashMap};

/// Position of a module within the repository layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// The top-level build at the repository root
    Root,
    /// A nested module
    Module,
}

/// A single buildable module from a project snapshot.
///
/// Dependencies are module ids as declared by the build files. Edges may
/// reference ids that are not part of the snapshot (external or unpublished
/// coordinates); they are kept as-is and resolution policy is left to the
/// consumer. `attributes` carries adapter-specific key/values (e.g. maven
/// coordinates) that only downstream writers interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub id: String,
    pub path: String,
    pub kind: ModuleKind,
    pub declared_version: Option<Version>,
    pub dependencies: BTreeSet<String>,
    pub attributes: HashMap<String, String>,
}

impl Module {
    /// Create a nested module with no dependencies
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Module {
            id: id.into(),
            path: path.into(),
            kind: ModuleKind::Module,
            declared_version: None,
            dependencies: BTreeSet::new(),
            attributes: HashMap::new(),
        }
    }

    /// Create the root module
    pub fn root(id: impl Into<String>) -> Self {
        Module {
            id: id.into(),
            path: ".".to_string(),
            kind: ModuleKind::Root,
            declared_version: None,
            dependencies: BTreeSet::new(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.declared_version = Some(version);
        self
    }

    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.insert(id.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Snapshot of a repository's module structure as assembled by a detector
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInformation {
    /// Name of the adapter that produced the snapshot
    pub adapter: String,
    pub modules: Vec<Module>,
}

impl ProjectInformation {
    pub fn new(adapter: impl Into<String>) -> Self {
        ProjectInformation {
            adapter: adapter.into(),
            modules: Vec::new(),
        }
    }
}
