use crate::error::{Result, UpdaterError};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Matches the version token of a tag: an optional non-digit prefix followed
/// by a `major.minor.patch` core with optional prerelease and build parts.
fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<prefix>\D*?)(?P<core>\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?)$")
            .expect("tag pattern is a valid regex")
    })
}

/// How stable releases rank against prereleases sharing a numeric core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrereleasePolicy {
    /// `1.2.0` outranks `1.2.0-beta`
    #[default]
    StableFirst,
    /// `1.2.0-beta` outranks `1.2.0`
    PrereleaseFirst,
}

/// Semantic version parsed from a release tag
///
/// The raw tag is kept verbatim: git reports tags by name and the updater
/// compares names, so the parsed fields are only used for ordering and display.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    major: u64,
    minor: u64,
    patch: u64,
    pre: semver::Prerelease,
    message: Option<String>,
}

impl Version {
    /// Parse a tag such as `v1.2.3`, `release-1.2.3-beta.1` or
    /// `v1.2.3   Release notes` (the `git tag -n` layout).
    ///
    /// Text after the first run of whitespace is kept as the annotation
    /// message. The version token itself must carry all three components.
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        let (token, message) = match trimmed.split_once(char::is_whitespace) {
            Some((token, rest)) => {
                let rest = rest.trim();
                (token, (!rest.is_empty()).then(|| rest.to_string()))
            }
            None => (trimmed, None),
        };

        let captures = tag_pattern().captures(token).ok_or_else(|| {
            UpdaterError::parse(format!(
                "Invalid version format: '{}' - expected [prefix]X.Y.Z[-pre]",
                tag
            ))
        })?;

        let core = &captures["core"];
        let parsed = semver::Version::parse(core)
            .map_err(|e| UpdaterError::parse(format!("Invalid version '{}': {}", tag, e)))?;

        Ok(Version {
            raw: tag.to_string(),
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            pre: parsed.pre,
            message,
        })
    }

    /// The tag exactly as it was given to [`Version::parse`]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Prerelease marker, e.g. `alpha` or `beta.2`
    pub fn prerelease_tag(&self) -> Option<&str> {
        (!self.pre.is_empty()).then(|| self.pre.as_str())
    }

    /// Annotation text following the tag name, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Three-way comparison under the given prerelease policy.
    ///
    /// Falls back to the raw tag string when everything else is equal, so
    /// `v1.0.0` and `1.0.0` are ordered rather than equal. That last step is
    /// not part of semver precedence.
    pub fn compare_with(&self, other: &Version, policy: PrereleasePolicy) -> Ordering {
        let core = (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch));
        if core != Ordering::Equal {
            return core;
        }

        let stability = match (self.pre.is_empty(), other.pre.is_empty()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        };
        let stability = match policy {
            PrereleasePolicy::StableFirst => stability,
            PrereleasePolicy::PrereleaseFirst => stability.reverse(),
        };

        stability
            .then_with(|| self.pre.cmp(&other.pre))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl FromStr for Version {
    type Err = UpdaterError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_with(other, PrereleasePolicy::StableFirst)
    }
}

/// Displays the tag name without the annotation message.
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.raw.trim().split_once(char::is_whitespace) {
            Some((name, _)) => f.write_str(name),
            None => f.write_str(self.raw.trim()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(tag: &str) -> Version {
        Version::parse(tag).unwrap()
    }

    #[test]
    fn test_version_parse() {
        let version = v("v1.2.3");
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), 3);
        assert_eq!(version.prerelease_tag(), None);
        assert_eq!(version.raw(), "v1.2.3");
    }

    #[test]
    fn test_version_parse_without_prefix() {
        let version = v("1.2.3");
        assert_eq!((version.major(), version.minor(), version.patch()), (1, 2, 3));
    }

    #[test]
    fn test_version_parse_word_prefix() {
        let version = v("release-10.0.7");
        assert_eq!((version.major(), version.minor(), version.patch()), (10, 0, 7));
    }

    #[test]
    fn test_version_parse_prerelease() {
        let alpha = v("v1.1.0-alpha");
        assert_eq!(alpha.prerelease_tag(), Some("alpha"));
        assert!(alpha.is_prerelease());

        let beta = v("v1.2.0-beta.2");
        assert_eq!(beta.prerelease_tag(), Some("beta.2"));
        assert_eq!((beta.major(), beta.minor(), beta.patch()), (1, 2, 0));
    }

    #[test]
    fn test_version_parse_annotation() {
        let version = v("v2.0.0   Rewrite the keymaps");
        assert_eq!(version.message(), Some("Rewrite the keymaps"));
        assert_eq!(version.to_string(), "v2.0.0");
        assert_eq!(version.raw(), "v2.0.0   Rewrite the keymaps");
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("v1.2.3.4").is_err());
        assert!(Version::parse("nightly").is_err());
        assert!(Version::parse("").is_err());
        assert!(Version::parse("v01.2.3").is_err());
        assert!(Version::parse("v1.2.x").is_err());
    }

    #[test]
    fn test_version_parse_error_kind() {
        let err = Version::parse("latest").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Parse);
    }

    #[test]
    fn test_version_from_str() {
        let version: Version = "v0.4.1".parse().unwrap();
        assert_eq!(version.patch(), 1);
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(v("v1.10.0") > v("v1.9.0"));
        assert!(v("v2.0.0") > v("v1.99.99"));
        assert!(v("v1.0.1") > v("v1.0.0"));
    }

    #[test]
    fn test_stable_outranks_prerelease() {
        assert!(v("v1.2.0") > v("v1.2.0-beta"));
        assert!(v("v1.2.0") > v("v1.2.0-alpha"));
        assert!(v("v1.2.0-alpha") > v("v1.1.9"));
    }

    #[test]
    fn test_prerelease_first_policy() {
        let stable = v("v1.2.0");
        let beta = v("v1.2.0-beta");
        assert_eq!(
            stable.compare_with(&beta, PrereleasePolicy::PrereleaseFirst),
            Ordering::Less
        );
        assert_eq!(
            stable.compare_with(&beta, PrereleasePolicy::StableFirst),
            Ordering::Greater
        );
    }

    #[test]
    fn test_prerelease_identifiers_ordered() {
        assert!(v("v1.2.0-beta") > v("v1.2.0-alpha"));
        assert!(v("v1.2.0-beta.2") > v("v1.2.0-beta.1"));
    }

    #[test]
    fn test_raw_string_breaks_ties() {
        let prefixed = v("v1.0.0");
        let bare = v("1.0.0");
        assert_ne!(prefixed, bare);
        assert_eq!(prefixed.cmp(&bare), Ordering::Greater);
        assert_eq!(bare.cmp(&prefixed), Ordering::Less);
    }

    #[test]
    fn test_strict_total_order() {
        let versions: Vec<Version> = [
            "v1.0.0",
            "1.0.0",
            "v1.0.0-alpha",
            "v1.0.0-beta",
            "v1.1.0",
            "v1.1.0-alpha",
            "release-1.1.0",
            "v2.0.0",
        ]
        .iter()
        .map(|t| v(t))
        .collect();

        for a in &versions {
            assert_eq!(a.cmp(a), Ordering::Equal);
            for b in &versions {
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
                if a.raw() != b.raw() {
                    assert_ne!(a.cmp(b), Ordering::Equal);
                }
                for c in &versions {
                    if a < b && b < c {
                        assert!(a < c, "{} < {} < {} not transitive", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_version_display() {
        assert_eq!(v("v1.2.3").to_string(), "v1.2.3");
        assert_eq!(v("1.2.3-beta").to_string(), "1.2.3-beta");
    }
}
