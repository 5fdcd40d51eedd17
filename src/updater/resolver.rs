use crate::domain::{RepoState, UpdateOutcome, UpdateSettings, Version};
use crate::error::{Result, UpdaterError};
use crate::git::RepoInspector;
use std::thread;
use tracing::{info, warn};

/// Works out the current and latest versions of a working copy
pub struct UpdateResolver<'a, R: RepoInspector> {
    repo: &'a R,
    settings: UpdateSettings,
}

impl<'a, R: RepoInspector> UpdateResolver<'a, R> {
    pub fn new(repo: &'a R, settings: UpdateSettings) -> Self {
        UpdateResolver { repo, settings }
    }

    pub fn settings(&self) -> &UpdateSettings {
        &self.settings
    }

    /// Fetch tags and gather the state of the checkout.
    ///
    /// The reachable-tag and available-tag listings are independent, so they
    /// run on two scoped threads and are joined before either is used.
    pub fn inspect(&self) -> Result<RepoState> {
        self.repo.fetch_all_tags()?;
        let current_commit = self.repo.current_commit()?;

        let (reachable, available) = thread::scope(|scope| {
            let reachable = scope.spawn(|| self.repo.tags_reachable_from(&current_commit));
            let available = scope.spawn(|| self.repo.list_tags(&self.settings));
            (join(reachable), join(available))
        });
        let reachable = reachable?;
        let available = available?;

        // A listing naming at least one tag always ends with an empty segment.
        let current_version = if reachable.len() > 1 {
            parse_versions(&reachable).into_iter().next()
        } else {
            None
        };

        Ok(RepoState {
            current_commit,
            current_version,
            available_versions: parse_versions(&available),
        })
    }

    /// Compare the current and latest versions of a gathered state.
    ///
    /// The checkout counts as up to date only when both tag names are
    /// identical; semantically equal versions under different names still
    /// report an update.
    pub fn decide(&self, state: &RepoState) -> UpdateOutcome {
        let Some(current) = state.current_version.clone() else {
            return UpdaterError::no_version(format!(
                "no release tag reaches commit {}",
                short_hash(&state.current_commit)
            ))
            .into();
        };
        let Some(latest) = state.latest().cloned() else {
            return UpdaterError::no_version("no release tags available").into();
        };

        if state.is_up_to_date() {
            info!(version = %current, "checkout is up to date");
            UpdateOutcome::UpToDate(current)
        } else {
            info!(%current, %latest, "update available");
            UpdateOutcome::UpdateAvailable { current, latest }
        }
    }

    /// Run a full update check.
    ///
    /// Any failure short-circuits into [`UpdateOutcome::Error`].
    pub fn resolve(&self) -> UpdateOutcome {
        match self.inspect() {
            Ok(state) => self.decide(&state),
            Err(e) => e.into(),
        }
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    handle
        .join()
        .unwrap_or_else(|_| Err(UpdaterError::inspect("tag listing thread panicked")))
}

/// Parse each listed tag, skipping blank segments and non-version tags.
fn parse_versions(tags: &[String]) -> Vec<Version> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .filter_map(|t| match Version::parse(t) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(tag = t, error = %e, "ignoring tag that is not a version");
                None
            }
        })
        .collect()
}

pub(crate) fn short_hash(hash: &str) -> &str {
    if hash.len() > 7 {
        &hash[..7]
    } else {
        hash
    }
}
