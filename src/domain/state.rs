use super::version::Version;

/// Snapshot of the working copy gathered for one update check
#[derive(Debug, Clone, PartialEq)]
pub struct RepoState {
    /// Full hash of `HEAD`
    pub current_commit: String,
    /// Highest tag merged into `HEAD`, if any tag reaches it
    pub current_version: Option<Version>,
    /// Filtered tags, newest first
    pub available_versions: Vec<Version>,
}

impl RepoState {
    /// Newest available version
    pub fn latest(&self) -> Option<&Version> {
        self.available_versions.first()
    }

    /// Whether the checkout sits exactly on the newest available tag.
    ///
    /// Compares tag names, not parsed versions.
    pub fn is_up_to_date(&self) -> bool {
        match (&self.current_version, self.latest()) {
            (Some(current), Some(latest)) => current.raw() == latest.raw(),
            _ => false,
        }
    }
}
