//! Git operations abstraction layer
//!
//! The updater talks to the repository only through the [RepoInspector]
//! trait. Two implementations exist:
//!
//! - [cli::GitCli]: runs the `git` executable in the working copy
//! - [mock::MockInspector]: scripted answers for tests
//!
//! # Usage
//!
//! ```rust
//! # use config_updater::git::RepoInspector;
//! # fn example<R: RepoInspector>(repo: &R) -> config_updater::Result<()> {
//! repo.fetch_all_tags()?;
//! let head = repo.current_commit()?;
//! let reachable = repo.tags_reachable_from(&head)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod mock;

pub use cli::GitCli;
pub use mock::MockInspector;

use crate::domain::UpdateSettings;
use crate::error::Result;

/// Read and merge operations the updater needs from a working copy
///
/// ## Thread Safety
///
/// Implementors must be `Send + Sync`: the resolver issues the two tag
/// listings from separate threads.
///
/// ## Error Handling
///
/// Failures of the underlying process surface as [crate::error::UpdaterError]
/// variants whose message includes the captured stdout/stderr.
pub trait RepoInspector: Send + Sync {
    /// Fetch every tag from all configured remotes.
    ///
    /// # Returns
    /// * `Ok(())` - Fetch completed
    /// * `Err(Fetch)` - git exited non-zero
    fn fetch_all_tags(&self) -> Result<()>;

    /// Hash of the commit checked out at `HEAD`.
    ///
    /// # Returns
    /// * `Ok(String)` - The single line git printed
    /// * `Err(Inspect)` - git failed or printed zero or several lines
    fn current_commit(&self) -> Result<String>;

    /// Tags offered as update targets, newest first.
    ///
    /// Ordering comes from git's version-aware sort. Tags rejected by
    /// [UpdateSettings::excludes] are removed.
    fn list_tags(&self, settings: &UpdateSettings) -> Result<Vec<String>>;

    /// Tags merged into `commit`, newest first, as raw output segments.
    ///
    /// The listing is split on `'\n'` without dropping the segment after the
    /// final newline, so a listing that names at least one tag always has at
    /// least two entries. Callers treat one or zero entries as "no version".
    fn tags_reachable_from(&self, commit: &str) -> Result<Vec<String>>;

    /// Whether the working tree has no unstaged modifications.
    fn is_tree_clean(&self) -> Result<bool>;

    /// Merge `tag` into the current branch.
    ///
    /// # Returns
    /// * `Ok(())` - git exited zero
    /// * `Err(Merge)` - git exited non-zero; message holds its output
    fn merge(&self, tag: &str) -> Result<()>;
}
