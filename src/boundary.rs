use crate::domain::{PrereleasePolicy, RepoState};
use std::cmp::Ordering;
use std::fmt;

/// Non-fatal conditions noticed while checking for updates.
/// These are reported to the user next to the outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The checkout is on a tag that sorts above every offered version,
    /// typically a prerelease hidden by the unstable filter
    AheadOfLatest { current: String, latest: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::AheadOfLatest { current, latest } => write!(
                f,
                "Current version '{}' is newer than the latest offered version '{}'",
                current, latest
            ),
        }
    }
}

/// Warnings that apply to a gathered repository state
pub fn check_state(state: &RepoState, policy: PrereleasePolicy) -> Vec<BoundaryWarning> {
    let mut warnings = Vec::new();

    if let (Some(current), Some(latest)) = (&state.current_version, state.latest()) {
        if current.compare_with(latest, policy) == Ordering::Greater {
            warnings.push(BoundaryWarning::AheadOfLatest {
                current: current.to_string(),
                latest: latest.to_string(),
            });
        }
    }

    warnings
}
