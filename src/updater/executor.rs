use crate::domain::{UpdateOutcome, Version};
use crate::error::UpdaterError;
use crate::git::RepoInspector;
use tracing::info;

/// Reason given when a merge is refused because of local changes
pub const DIRTY_TREE_MESSAGE: &str =
    "the working tree has uncommitted changes; commit or stash them and try again";

/// Moves the checkout to a target version
pub struct UpdateExecutor<'a, R: RepoInspector> {
    repo: &'a R,
}

impl<'a, R: RepoInspector> UpdateExecutor<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        UpdateExecutor { repo }
    }

    /// Merge `target` into the current branch if the tree is clean.
    ///
    /// The clean check and the merge are two separate git calls; nothing
    /// stops another process from touching the tree in between.
    pub fn apply(&self, target: &Version) -> UpdateOutcome {
        match self.repo.is_tree_clean() {
            Ok(true) => {}
            Ok(false) => return UpdaterError::dirty_tree(DIRTY_TREE_MESSAGE).into(),
            Err(e) => return e.into(),
        }

        let tag = target.to_string();
        info!(%tag, "merging");
        match self.repo.merge(&tag) {
            Ok(()) => UpdateOutcome::MergeSucceeded(target.clone()),
            Err(e) => e.into(),
        }
    }
}
