use super::version::Version;
use crate::error::{ErrorKind, UpdaterError};
use std::fmt;

/// Terminal result of an update check or update attempt
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The checkout already sits on the newest available tag
    UpToDate(Version),
    /// A newer tag than the current one is available
    UpdateAvailable { current: Version, latest: Version },
    /// The target tag was merged into the current branch
    MergeSucceeded(Version),
    /// The merge was refused before running
    MergeRejected(String),
    /// Any failure along the way, with captured git output where available
    Error { kind: ErrorKind, detail: String },
}

impl UpdateOutcome {
    /// Whether the command that produced this outcome should exit non-zero
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            UpdateOutcome::MergeRejected(_) | UpdateOutcome::Error { .. }
        )
    }
}

/// A dirty tree refuses the merge; every other error ends the workflow.
impl From<UpdaterError> for UpdateOutcome {
    fn from(err: UpdaterError) -> Self {
        match err {
            UpdaterError::DirtyTree(reason) => UpdateOutcome::MergeRejected(reason),
            err => UpdateOutcome::Error {
                kind: err.kind(),
                detail: err.detail(),
            },
        }
    }
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateOutcome::UpToDate(version) => {
                write!(f, "Already up to date ({})", version)
            }
            UpdateOutcome::UpdateAvailable { current, latest } => {
                write!(f, "Update available: {} -> {}", current, latest)
            }
            UpdateOutcome::MergeSucceeded(version) => {
                write!(f, "Updated to {}", version)
            }
            UpdateOutcome::MergeRejected(reason) => {
                write!(f, "Update refused: {}", reason)
            }
            UpdateOutcome::Error { kind, detail } => {
                write!(f, "{}: {}", kind, detail)
            }
        }
    }
}
