//! Command workflows
//!
//! Each workflow drives the resolver and executor against any
//! [`RepoInspector`], reports through a [`Notifier`], and returns the final
//! [`UpdateOutcome`] so the caller can pick an exit code. Nothing here
//! depends on clap.

use anyhow::Result;

use crate::boundary;
use crate::config::Config;
use crate::domain::{RepoState, UpdateOutcome, UpdateSettings, Version};
use crate::git::RepoInspector;
use crate::ui::{self, Level, Notifier};
use crate::updater::{UpdateExecutor, UpdateResolver};

/// Options that override the configuration file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowArgs {
    /// Path to custom config file
    pub config_path: Option<String>,

    /// Working copy to manage
    pub repo: Option<std::path::PathBuf>,

    /// Offer prerelease tags regardless of the config file
    pub allow_unstable: bool,
}

impl WorkflowArgs {
    /// Fold command-line overrides into a loaded configuration
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(repo) = &self.repo {
            config.repository.path = Some(repo.clone());
        }
        if self.allow_unstable {
            config.updater.allow_unstable = true;
        }
        config
    }
}

/// Gather state, report boundary warnings, and decide.
fn check_with_state<R: RepoInspector, N: Notifier>(
    repo: &R,
    settings: UpdateSettings,
    notifier: &N,
) -> (Option<RepoState>, UpdateOutcome) {
    let resolver = UpdateResolver::new(repo, settings);
    let state = match resolver.inspect() {
        Ok(state) => state,
        Err(e) => return (None, e.into()),
    };

    for warning in boundary::check_state(&state, settings.prerelease_policy) {
        notifier.warning(&warning);
    }

    let outcome = resolver.decide(&state);
    (Some(state), outcome)
}

/// Read-only update check
pub fn run_check<R: RepoInspector, N: Notifier>(
    repo: &R,
    settings: UpdateSettings,
    notifier: &N,
) -> UpdateOutcome {
    let (_, outcome) = check_with_state(repo, settings, notifier);
    notifier.outcome(&outcome);
    outcome
}

/// Check, confirm, then merge the latest version
///
/// `confirm` receives the current and latest versions and decides whether
/// to go ahead. Declining leaves the checkout untouched and returns the
/// `UpdateAvailable` outcome, which is not a failure.
pub fn run_update<R, N, F>(
    repo: &R,
    settings: UpdateSettings,
    notifier: &N,
    confirm: F,
) -> Result<UpdateOutcome>
where
    R: RepoInspector,
    N: Notifier,
    F: FnOnce(&Version, &Version) -> Result<bool>,
{
    let (_, outcome) = check_with_state(repo, settings, notifier);

    let UpdateOutcome::UpdateAvailable { current, latest } = &outcome else {
        notifier.outcome(&outcome);
        return Ok(outcome);
    };

    notifier.notify(Level::Action, &outcome.to_string());
    if !confirm(current, latest)? {
        notifier.notify(Level::Info, "Update cancelled");
        return Ok(outcome);
    }

    let result = UpdateExecutor::new(repo).apply(latest);
    notifier.outcome(&result);
    Ok(result)
}

/// List the versions on offer, marking the current one
pub fn run_versions<R: RepoInspector, N: Notifier>(
    repo: &R,
    settings: UpdateSettings,
    notifier: &N,
) -> UpdateOutcome {
    match check_with_state(repo, settings, notifier) {
        (Some(state), outcome) => {
            notifier.listing(
                "Available versions:",
                &ui::format_version_list(&state.available_versions, state.current_version.as_ref()),
            );
            if outcome.is_failure() {
                notifier.outcome(&outcome);
            }
            outcome
        }
        (None, outcome) => {
            notifier.outcome(&outcome);
            outcome
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::git::MockInspector;
    use crate::ui::RecordingNotifier;

    const HEAD: &str = "9c1e2b7a";

    fn repo() -> MockInspector {
        let mut repo = MockInspector::new();
        repo.set_head(HEAD);
        repo.set_reachable(HEAD, &["v1.0.0"]);
        repo.add_tag("v1.2.0");
        repo.add_tag("v1.1.0");
        repo.add_tag("v1.0.0");
        repo
    }

    #[test]
    fn test_workflow_args_override_config() {
        let args = WorkflowArgs {
            config_path: None,
            repo: Some("/tmp/dotfiles".into()),
            allow_unstable: true,
        };
        let config = args.apply_to(Config::default());
        assert!(config.updater.allow_unstable);
        assert_eq!(config.repository_path(), std::path::PathBuf::from("/tmp/dotfiles"));
    }

    #[test]
    fn test_workflow_args_keep_config_when_unset() {
        let mut config = Config::default();
        config.updater.allow_unstable = true;
        let config = WorkflowArgs::default().apply_to(config);
        assert!(config.updater.allow_unstable);
    }

    #[test]
    fn test_check_reports_update() {
        let repo = repo();
        let notifier = RecordingNotifier::new();

        let outcome = run_check(&repo, UpdateSettings::default(), &notifier);
        assert!(matches!(outcome, UpdateOutcome::UpdateAvailable { .. }));
        assert_eq!(notifier.messages()[0].0, Level::Action);
        assert!(repo.merges().is_empty());
    }

    #[test]
    fn test_update_declined_does_not_merge() {
        let repo = repo();
        let notifier = RecordingNotifier::new();

        let outcome =
            run_update(&repo, UpdateSettings::default(), &notifier, |_, _| Ok(false)).unwrap();
        assert!(!outcome.is_failure());
        assert!(repo.merges().is_empty());
        assert_eq!(notifier.messages().last().unwrap().1, "Update cancelled");
    }

    #[test]
    fn test_update_confirmed_merges_latest() {
        let repo = repo();
        let notifier = RecordingNotifier::new();

        let outcome = run_update(&repo, UpdateSettings::default(), &notifier, |current, latest| {
            assert_eq!(current.raw(), "v1.0.0");
            assert_eq!(latest.raw(), "v1.2.0");
            Ok(true)
        })
        .unwrap();

        assert!(matches!(outcome, UpdateOutcome::MergeSucceeded(v) if v.raw() == "v1.2.0"));
        assert_eq!(repo.merges(), vec!["v1.2.0"]);
    }

    #[test]
    fn test_update_when_up_to_date_skips_prompt() {
        let mut repo = MockInspector::new();
        repo.set_head(HEAD);
        repo.set_reachable(HEAD, &["v1.2.0"]);
        repo.add_tag("v1.2.0");
        let notifier = RecordingNotifier::new();

        let outcome = run_update(&repo, UpdateSettings::default(), &notifier, |_, _| -> Result<bool> {
            panic!("no prompt expected")
        })
        .unwrap();
        assert!(matches!(outcome, UpdateOutcome::UpToDate(_)));
        assert_eq!(notifier.messages()[0].0, Level::Info);
    }

    #[test]
    fn test_check_warns_when_ahead_of_latest() {
        let mut repo = MockInspector::new();
        repo.set_head(HEAD);
        repo.set_reachable(HEAD, &["v2.0.0-alpha", "v1.2.0"]);
        repo.add_tag("v2.0.0-alpha");
        repo.add_tag("v1.2.0");
        let notifier = RecordingNotifier::new();

        let outcome = run_check(&repo, UpdateSettings::default(), &notifier);
        assert!(matches!(outcome, UpdateOutcome::UpdateAvailable { .. }));
        let messages = notifier.messages();
        assert_eq!(messages[0].0, Level::Warning);
        assert!(messages[0].1.contains("v2.0.0-alpha"));
    }

    #[test]
    fn test_versions_reports_errors() {
        let mut repo = repo();
        repo.fail_fetch("fatal: unable to access remote");
        let notifier = RecordingNotifier::new();

        let outcome = run_versions(&repo, UpdateSettings::default(), &notifier);
        assert!(matches!(outcome, UpdateOutcome::Error { kind: ErrorKind::Fetch, .. }));
        assert_eq!(notifier.messages()[0].0, Level::Error);
    }

    #[test]
    fn test_versions_listing_goes_through_notifier() {
        let notifier = RecordingNotifier::new();

        let outcome = run_versions(&repo(), UpdateSettings::default(), &notifier);
        assert!(matches!(outcome, UpdateOutcome::UpdateAvailable { .. }));
        assert_eq!(
            notifier.messages(),
            vec![
                (Level::Info, "Available versions:".to_string()),
                (Level::Info, "  v1.2.0".to_string()),
                (Level::Info, "  v1.1.0".to_string()),
                (Level::Info, "* v1.0.0".to_string()),
            ]
        );
    }
}
