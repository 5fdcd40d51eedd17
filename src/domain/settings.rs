use super::version::PrereleasePolicy;

/// Update behaviour chosen at startup and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateSettings {
    /// Offer prerelease tags as update targets
    pub allow_unstable: bool,
    /// Ranking of stable releases against prereleases with the same core
    pub prerelease_policy: PrereleasePolicy,
}

impl UpdateSettings {
    pub fn new(allow_unstable: bool) -> Self {
        UpdateSettings {
            allow_unstable,
            ..Default::default()
        }
    }

    /// Whether a tag is hidden from the list of available versions.
    ///
    /// Case-sensitive substring match. Tags containing `beta` are hidden even
    /// when `allow_unstable` is set; only `alpha` tags depend on the flag.
    // TODO: confirm with the config maintainers whether beta tags should follow allow_unstable too
    pub fn excludes(&self, tag: &str) -> bool {
        (!self.allow_unstable && tag.contains("alpha")) || tag.contains("beta")
    }

    /// Apply [`UpdateSettings::excludes`] to a newest-first tag listing,
    /// dropping blank lines.
    pub fn filter_tags<I, S>(&self, tags: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty() && !self.excludes(t))
            .collect()
    }
}
