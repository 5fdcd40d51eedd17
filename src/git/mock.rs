use crate::domain::UpdateSettings;
use crate::error::{Result, UpdaterError};
use crate::git::RepoInspector;
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted repository for testing without running git
///
/// Tag listings are rendered the way git prints them (one tag per line, each
/// newline-terminated) before being split, so callers see the same shape as
/// from [super::GitCli].
pub struct MockInspector {
    head: Option<String>,
    tags: Vec<String>,
    reachable: HashMap<String, Vec<String>>,
    clean: bool,
    fetch_error: Option<String>,
    merge_error: Option<String>,
    merges: Mutex<Vec<String>>,
}

impl MockInspector {
    /// Create a clean repository with no commits or tags
    pub fn new() -> Self {
        MockInspector {
            head: None,
            tags: Vec::new(),
            reachable: HashMap::new(),
            clean: true,
            fetch_error: None,
            merge_error: None,
            merges: Mutex::new(Vec::new()),
        }
    }

    /// Set the commit `HEAD` points at
    pub fn set_head(&mut self, commit: impl Into<String>) {
        self.head = Some(commit.into());
    }

    /// Add a tag to the full listing; call newest first
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Tags merged into `commit`, newest first
    pub fn set_reachable(&mut self, commit: impl Into<String>, tags: &[&str]) {
        let listing: String = tags.iter().map(|t| format!("{}\n", t)).collect();
        self.reachable.insert(
            commit.into(),
            listing.split('\n').map(str::to_string).collect(),
        );
    }

    /// Exact segments returned for `commit`, bypassing git's line layout
    pub fn set_reachable_raw(&mut self, commit: impl Into<String>, segments: Vec<String>) {
        self.reachable.insert(commit.into(), segments);
    }

    pub fn set_clean(&mut self, clean: bool) {
        self.clean = clean;
    }

    /// Make `fetch_all_tags` fail with the given captured output
    pub fn fail_fetch(&mut self, output: impl Into<String>) {
        self.fetch_error = Some(output.into());
    }

    /// Make `merge` fail with the given captured output
    pub fn fail_merge(&mut self, output: impl Into<String>) {
        self.merge_error = Some(output.into());
    }

    /// Tags passed to `merge`, in call order
    pub fn merges(&self) -> Vec<String> {
        self.merges.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Default for MockInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoInspector for MockInspector {
    fn fetch_all_tags(&self) -> Result<()> {
        match &self.fetch_error {
            Some(output) => Err(UpdaterError::fetch(output.clone())),
            None => Ok(()),
        }
    }

    fn current_commit(&self) -> Result<String> {
        self.head
            .clone()
            .ok_or_else(|| UpdaterError::inspect("fatal: ambiguous argument 'HEAD'"))
    }

    fn list_tags(&self, settings: &UpdateSettings) -> Result<Vec<String>> {
        Ok(settings.filter_tags(&self.tags))
    }

    fn tags_reachable_from(&self, commit: &str) -> Result<Vec<String>> {
        Ok(self
            .reachable
            .get(commit)
            .cloned()
            .unwrap_or_else(|| vec![String::new()]))
    }

    fn is_tree_clean(&self) -> Result<bool> {
        Ok(self.clean)
    }

    fn merge(&self, tag: &str) -> Result<()> {
        if let Ok(mut merges) = self.merges.lock() {
            merges.push(tag.to_string());
        }
        match &self.merge_error {
            Some(output) => Err(UpdaterError::merge(output.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_reachable_has_trailing_segment() {
        let mut repo = MockInspector::new();
        repo.set_reachable("abc", &["v1.0.0"]);
        assert_eq!(repo.tags_reachable_from("abc").unwrap(), vec!["v1.0.0", ""]);
    }

    #[test]
    fn test_mock_unknown_commit_is_empty_listing() {
        let repo = MockInspector::new();
        assert_eq!(repo.tags_reachable_from("nope").unwrap(), vec![""]);
    }

    #[test]
    fn test_mock_list_tags_applies_filter() {
        let mut repo = MockInspector::new();
        repo.add_tag("v1.2.0-beta");
        repo.add_tag("v1.1.0-alpha");
        repo.add_tag("v1.0.0");

        let stable = repo.list_tags(&UpdateSettings::new(false)).unwrap();
        assert_eq!(stable, vec!["v1.0.0"]);
        let unstable = repo.list_tags(&UpdateSettings::new(true)).unwrap();
        assert_eq!(unstable, vec!["v1.1.0-alpha", "v1.0.0"]);
    }

    #[test]
    fn test_mock_records_merges() {
        let mut repo = MockInspector::new();
        repo.fail_merge("CONFLICT (content)");
        assert!(repo.merge("v2.0.0").is_err());
        assert_eq!(repo.merges(), vec!["v2.0.0"]);
    }

    #[test]
    fn test_mock_without_head() {
        let repo = MockInspector::default();
        assert!(repo.current_commit().is_err());
        assert!(repo.is_tree_clean().unwrap());
    }
}
