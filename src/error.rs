use std::fmt;

use thiserror::Error;

/// Unified error type for updater operations
///
/// Variants raised by subprocess calls carry the captured git output so the
/// top-level handler can show it to the user.
#[derive(Error, Debug)]
pub enum UpdaterError {
    #[error("Failed to fetch tags: {0}")]
    Fetch(String),

    #[error("Repository inspection failed: {0}")]
    Inspect(String),

    #[error("No version found: {0}")]
    NoVersionFound(String),

    #[error("Working tree is dirty: {0}")]
    DirtyTree(String),

    #[error("Merge failed: {0}")]
    Merge(String),

    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git repository error: {0}")]
    Repository(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in config-updater
pub type Result<T> = std::result::Result<T, UpdaterError>;

/// Error category reported in [`crate::domain::UpdateOutcome::Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Inspect,
    NoVersionFound,
    DirtyTree,
    Merge,
    Parse,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Fetch => "FetchError",
            ErrorKind::Inspect => "InspectError",
            ErrorKind::NoVersionFound => "NoVersionFound",
            ErrorKind::DirtyTree => "DirtyTree",
            ErrorKind::Merge => "MergeError",
            ErrorKind::Parse => "ParseError",
            ErrorKind::Config => "ConfigError",
        };
        f.write_str(name)
    }
}

impl UpdaterError {
    pub fn fetch(msg: impl Into<String>) -> Self {
        UpdaterError::Fetch(msg.into())
    }

    pub fn inspect(msg: impl Into<String>) -> Self {
        UpdaterError::Inspect(msg.into())
    }

    pub fn no_version(msg: impl Into<String>) -> Self {
        UpdaterError::NoVersionFound(msg.into())
    }

    pub fn dirty_tree(msg: impl Into<String>) -> Self {
        UpdaterError::DirtyTree(msg.into())
    }

    pub fn merge(msg: impl Into<String>) -> Self {
        UpdaterError::Merge(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        UpdaterError::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        UpdaterError::Config(msg.into())
    }

    /// Category of this error.
    ///
    /// Repository discovery and I/O failures happen while inspecting the
    /// working copy, so both fold into [`ErrorKind::Inspect`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            UpdaterError::Fetch(_) => ErrorKind::Fetch,
            UpdaterError::Inspect(_) => ErrorKind::Inspect,
            UpdaterError::NoVersionFound(_) => ErrorKind::NoVersionFound,
            UpdaterError::DirtyTree(_) => ErrorKind::DirtyTree,
            UpdaterError::Merge(_) => ErrorKind::Merge,
            UpdaterError::Parse(_) => ErrorKind::Parse,
            UpdaterError::Config(_) => ErrorKind::Config,
            UpdaterError::Repository(_) | UpdaterError::Io(_) => ErrorKind::Inspect,
        }
    }

    /// The message without the category prefix.
    pub fn detail(&self) -> String {
        match self {
            UpdaterError::Fetch(msg)
            | UpdaterError::Inspect(msg)
            | UpdaterError::NoVersionFound(msg)
            | UpdaterError::DirtyTree(msg)
            | UpdaterError::Merge(msg)
            | UpdaterError::Parse(msg)
            | UpdaterError::Config(msg) => msg.clone(),
            UpdaterError::Repository(e) => e.message().to_string(),
            UpdaterError::Io(e) => e.to_string(),
        }
    }
}
