use crate::domain::{PrereleasePolicy, UpdateSettings};
use crate::error::{Result, UpdaterError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "config-updater.toml";

/// Represents the complete configuration for config-updater.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub updater: UpdaterConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,
}

fn default_prefer_stable() -> bool {
    true
}

fn default_git() -> String {
    "git".to_string()
}

/// Which tags count as update targets and how they rank.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UpdaterConfig {
    /// Offer prerelease (alpha) tags
    #[serde(default)]
    pub allow_unstable: bool,

    /// Rank `1.2.0` above `1.2.0-beta`
    #[serde(default = "default_prefer_stable")]
    pub prefer_stable: bool,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        UpdaterConfig {
            allow_unstable: false,
            prefer_stable: default_prefer_stable(),
        }
    }
}

/// Where the managed working copy lives and how to reach git.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    /// Working copy to update; the current directory when unset
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// git executable
    #[serde(default = "default_git")]
    pub git: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            path: None,
            git: default_git(),
        }
    }
}

impl Config {
    /// Settings handed to the resolver
    pub fn update_settings(&self) -> UpdateSettings {
        UpdateSettings {
            allow_unstable: self.updater.allow_unstable,
            prerelease_policy: if self.updater.prefer_stable {
                PrereleasePolicy::StableFirst
            } else {
                PrereleasePolicy::PrereleaseFirst
            },
        }
    }

    /// Working copy path, falling back to the current directory
    pub fn repository_path(&self) -> PathBuf {
        self.repository
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `config-updater.toml` in current directory
/// 3. `config-updater.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err(Config)` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        PathBuf::from(path)
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Config::default());
        }
        path
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        UpdaterError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    parse_config(&config_str)
        .map_err(|e| UpdaterError::config(format!("Invalid '{}': {}", path.display(), e.detail())))
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| UpdaterError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.updater.allow_unstable);
        assert!(config.updater.prefer_stable);
        assert_eq!(config.repository.git, "git");
        assert_eq!(config.repository_path(), PathBuf::from("."));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_update_settings_mapping() {
        let config = parse_config(
            r#"
[updater]
allow_unstable = true
prefer_stable = false
"#,
        )
        .unwrap();

        let settings = config.update_settings();
        assert!(settings.allow_unstable);
        assert_eq!(settings.prerelease_policy, PrereleasePolicy::PrereleaseFirst);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = parse_config("[updater\nallow_unstable = 1").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }
}
