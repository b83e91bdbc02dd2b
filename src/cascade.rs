//! Cascade propagation of bumps across the module dependency graph.
//!
//! A module's final bump is the join of its local bump and the bumps
//! derived from its dependencies through the configured rules. The engine
//! computes this as a monotone fixed point: values only ever climb the
//! `none < patch < minor < major` lattice and are bounded by `major`, so
//! repeated full passes converge to a unique result regardless of
//! traversal order or cycle structure. No explicit cycle detection is
//! needed.

use crate::analyzer::resolver::bump_for_dependency;
use crate::boundary::BoundaryWarning;
use crate::config::DependencyRules;
use crate::domain::BumpType;
use crate::error::{MonoBumpError, Result};
use crate::registry::ModuleRegistry;
use std::collections::HashMap;

/// Result of one cascade computation
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeOutcome {
    /// Final bump per module id
    pub bumps: HashMap<String, BumpType>,
    /// Non-fatal conditions met while propagating (skipped unknown edges)
    pub warnings: Vec<BoundaryWarning>,
}

/// Computes graph-stable final bumps from per-module local bumps
pub struct CascadeEngine<'a> {
    registry: &'a ModuleRegistry,
    rules: DependencyRules,
}

impl<'a> CascadeEngine<'a> {
    pub fn new(registry: &'a ModuleRegistry, rules: DependencyRules) -> Self {
        CascadeEngine { registry, rules }
    }

    /// Compute the final bump for every module.
    ///
    /// The result starts as a copy of `local_bumps` (modules absent from
    /// the input default to `none`) and is raised pass by pass until a
    /// full pass changes nothing. Dependency edges pointing outside the
    /// registry are skipped and reported as warnings.
    ///
    /// Passes are capped at `|modules| * 4` (the lattice has four levels
    /// above bottom); hitting the cap means the monotonicity invariant is
    /// broken and is reported as a fatal error, never as a normal result.
    pub fn compute_final_bumps(
        &self,
        local_bumps: &HashMap<String, BumpType>,
    ) -> Result<CascadeOutcome> {
        let mut bumps = local_bumps.clone();
        for id in self.registry.ids() {
            bumps.entry(id.to_string()).or_insert(BumpType::None);
        }

        let mut warnings = Vec::new();
        for module in self.registry.modules() {
            for dependency in &module.dependencies {
                if !self.registry.contains(dependency) {
                    warnings.push(BoundaryWarning::UnknownDependency {
                        module: module.id.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        if self.registry.is_empty() {
            return Ok(CascadeOutcome { bumps, warnings });
        }

        let max_passes = self.registry.len() * 4;
        let mut settled = false;

        for _pass in 0..max_passes {
            let mut changed = false;

            for module in self.registry.modules() {
                let current = bumps
                    .get(module.id.as_str())
                    .copied()
                    .unwrap_or(BumpType::None);
                let mut candidate = current;

                for dependency in &module.dependencies {
                    if !self.registry.contains(dependency) {
                        continue;
                    }
                    let dependency_bump = bumps
                        .get(dependency.as_str())
                        .copied()
                        .unwrap_or(BumpType::None);
                    candidate = candidate.merge(bump_for_dependency(dependency_bump, &self.rules));
                }

                if candidate > current {
                    bumps.insert(module.id.clone(), candidate);
                    changed = true;
                }
            }

            if !changed {
                settled = true;
                break;
            }
        }

        if !settled {
            return Err(MonoBumpError::cascade(format!(
                "no fixed point after {} passes over {} modules",
                max_passes,
                self.registry.len()
            )));
        }

        Ok(CascadeOutcome { bumps, warnings })
    }
}
