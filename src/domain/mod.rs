//! Domain logic - pure business rules independent of git and build files

pub mod bump;
pub mod commit;
pub mod module;
pub mod tag;
pub mod version;

pub use bump::{BumpType, CommitBump};
pub use commit::CommitInfo;
pub use module::{Module, ModuleKind, ProjectInformation};
pub use tag::Tag;
pub use version::Version;
