use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::domain::{commit, tag};
use crate::error::{GitReleaseError, Result};

/// Represents the complete configuration for git-release.
///
/// Covers tag selection, commit classification, and changelog rendering.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub commits: CommitsConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,
}

/// Configuration for locating release tags and the versions inside them.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TagsConfig {
    /// Glob matched against tag names when listing release tags
    #[serde(default = "default_tag_match")]
    pub r#match: String,

    /// Regex extracting the version number from a tag name
    #[serde(default = "default_tag_version_match")]
    pub version_match: String,
}

fn default_tag_match() -> String {
    "v*".to_string()
}

fn default_tag_version_match() -> String {
    tag::DEFAULT_TAG_VERSION_MATCH.to_string()
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            r#match: default_tag_match(),
            version_match: default_tag_version_match(),
        }
    }
}

/// Configuration for conventional commit classification.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CommitsConfig {
    /// Subject pattern with four capture groups:
    /// type, scope (optional), breaking marker (optional), description
    #[serde(default = "default_commit_pattern")]
    pub pattern: String,

    /// Map from type token to release level name
    #[serde(default = "default_releases")]
    pub releases: HashMap<String, String>,

    /// Scopes excluded from release calculation and changelog
    #[serde(default)]
    pub ignore_scopes: Vec<String>,
}

fn default_commit_pattern() -> String {
    commit::DEFAULT_COMMIT_PATTERN.to_string()
}

fn default_releases() -> HashMap<String, String> {
    commit::default_releases()
}

impl Default for CommitsConfig {
    fn default() -> Self {
        CommitsConfig {
            pattern: default_commit_pattern(),
            releases: default_releases(),
            ignore_scopes: Vec::new(),
        }
    }
}

/// Configuration for release-notes rendering.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChangelogConfig {
    /// Output format: "markdown", "slack" or "plain"
    #[serde(default = "default_format")]
    pub format: String,

    /// Type keys to render, in section order. Include "no_type" for a
    /// catch-all bucket of non-conventional commits.
    #[serde(default = "default_order")]
    pub order: Vec<String>,

    /// Map from type key to human section title
    #[serde(default = "default_sections")]
    pub sections: HashMap<String, String>,

    /// Free-text release title appended to the version line
    #[serde(default)]
    pub title: Option<String>,

    /// Base URL commit links are built from
    #[serde(default)]
    pub commit_url: String,

    #[serde(default = "default_true")]
    pub display_title: bool,

    #[serde(default = "default_true")]
    pub display_links: bool,

    #[serde(default)]
    pub display_author: bool,
}

fn default_format() -> String {
    "markdown".to_string()
}

fn default_order() -> Vec<String> {
    vec![
        "feat".to_string(),
        "fix".to_string(),
        "docs".to_string(),
        commit::NO_TYPE.to_string(),
    ]
}

fn default_sections() -> HashMap<String, String> {
    HashMap::from([
        ("feat".to_string(), "Features".to_string()),
        ("fix".to_string(), "Bug fixes".to_string()),
        ("docs".to_string(), "Documentation".to_string()),
        (commit::NO_TYPE.to_string(), "Other work".to_string()),
    ])
}

fn default_true() -> bool {
    true
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            format: default_format(),
            order: default_order(),
            sections: default_sections(),
            title: None,
            commit_url: String::new(),
            display_title: true,
            display_links: true,
            display_author: false,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitrelease.toml` in current directory
/// 3. `.gitrelease.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitrelease.toml").exists() {
        fs::read_to_string("./gitrelease.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitrelease.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| GitReleaseError::config(e.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tag_config() {
        let config = Config::default();
        assert_eq!(config.tags.r#match, "v*");
        assert_eq!(config.tags.version_match, r"\d+\.\d+\.\d+");
    }

    #[test]
    fn test_default_releases() {
        let config = Config::default();
        assert_eq!(
            config.commits.releases.get("fix"),
            Some(&"patch".to_string())
        );
        assert_eq!(
            config.commits.releases.get("feat"),
            Some(&"minor".to_string())
        );
        assert!(config.commits.ignore_scopes.is_empty());
    }

    #[test]
    fn test_default_changelog_config() {
        let config = Config::default();
        assert_eq!(config.changelog.format, "markdown");
        assert_eq!(config.changelog.order.first(), Some(&"feat".to_string()));
        assert_eq!(
            config.changelog.sections.get("fix"),
            Some(&"Bug fixes".to_string())
        );
        assert!(config.changelog.display_title);
        assert!(config.changelog.display_links);
        assert!(!config.changelog.display_author);
    }

    #[test]
    fn test_partial_file_keeps_field_defaults() {
        let config: Config = toml::from_str(
            r#"
[commits]
ignore_scopes = ["bump"]
"#,
        )
        .unwrap();

        assert_eq!(config.commits.ignore_scopes, vec!["bump".to_string()]);
        // untouched sections keep their defaults
        assert_eq!(config.commits.pattern, commit::DEFAULT_COMMIT_PATTERN);
        assert_eq!(config.changelog.format, "markdown");
    }
}
