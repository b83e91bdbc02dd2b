use crate::domain::{Module, ProjectInformation};
use crate::error::{MonoBumpError, Result};
use std::collections::{BTreeSet, HashMap};

/// Immutable, id-indexed store of the modules of one repository snapshot.
///
/// Owns every [Module] record; dependency edges are plain id references
/// resolved through registry lookup, so the logical graph may cycle without
/// creating ownership cycles in memory. Reverse edges (dependents) are
/// computed once at construction. Built once per run and never mutated
/// afterwards.
///
/// Edges referencing ids that are not part of the snapshot are kept on the
/// module as declared; it is up to consumers to skip or report them.
#[derive(Debug)]
pub struct ModuleRegistry {
    modules: HashMap<String, Module>,
    /// Sorted ids, giving a deterministic iteration order
    order: Vec<String>,
    dependents: HashMap<String, BTreeSet<String>>,
}

impl ModuleRegistry {
    /// Build a registry from a project snapshot.
    ///
    /// Fails on duplicate module ids; accepts cyclic dependency graphs.
    pub fn from_project(project: ProjectInformation) -> Result<Self> {
        let mut modules = HashMap::new();
        let mut dependents: HashMap<String, BTreeSet<String>> = HashMap::new();

        for module in project.modules {
            for dependency in &module.dependencies {
                dependents
                    .entry(dependency.clone())
                    .or_default()
                    .insert(module.id.clone());
            }
            let id = module.id.clone();
            if modules.insert(id.clone(), module).is_some() {
                return Err(MonoBumpError::module(format!(
                    "duplicate module id '{}' in project snapshot",
                    id
                )));
            }
        }

        let mut order: Vec<String> = modules.keys().cloned().collect();
        order.sort();

        Ok(ModuleRegistry {
            modules,
            order,
            dependents,
        })
    }

    /// Look up a module by id
    pub fn get_module(&self, id: &str) -> Result<&Module> {
        self.modules
            .get(id)
            .ok_or_else(|| MonoBumpError::module(format!("module not found: {}", id)))
    }

    /// Look up a module by id, returning `None` when absent
    pub fn find_module(&self, id: &str) -> Option<&Module> {
        self.modules.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.modules.contains_key(id)
    }

    /// Module ids in deterministic (sorted) order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|id| id.as_str())
    }

    /// Modules in deterministic (sorted-id) order
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.order.iter().filter_map(|id| self.modules.get(id))
    }

    /// Ids of the modules that directly depend on `id`
    pub fn dependents_of(&self, id: &str) -> impl Iterator<Item = &str> {
        self.dependents
            .get(id)
            .into_iter()
            .flat_map(|set| set.iter().map(|s| s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
