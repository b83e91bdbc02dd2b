//! Analysis engine for determining version bumps from commits

pub mod local;
pub mod resolver;

pub use local::BumpAnalyzer;
pub use resolver::{bump_for_commit, bump_for_dependency};
