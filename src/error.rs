use thiserror::Error;

/// Unified error type for mono-bump operations
#[derive(Error, Debug)]
pub enum MonoBumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Module error: {0}")]
    Module(String),

    #[error("Cascade invariant violated: {0}")]
    Cascade(String),

    #[error("Module detection failed: {0}")]
    Detect(String),

    #[error("Version update failed: {0}")]
    Update(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in mono-bump
pub type Result<T> = std::result::Result<T, MonoBumpError>;

impl MonoBumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        MonoBumpError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        MonoBumpError::Version(msg.into())
    }

    /// Create a module error with context
    pub fn module(msg: impl Into<String>) -> Self {
        MonoBumpError::Module(msg.into())
    }

    /// Create a cascade error with context
    pub fn cascade(msg: impl Into<String>) -> Self {
        MonoBumpError::Cascade(msg.into())
    }

    /// Create a detection error with context
    pub fn detect(msg: impl Into<String>) -> Self {
        MonoBumpError::Detect(msg.into())
    }

    /// Create an update error with context
    pub fn update(msg: impl Into<String>) -> Self {
        MonoBumpError::Update(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        MonoBumpError::Tag(msg.into())
    }
}
