use regex::Regex;

use crate::error::{GitReleaseError, Result};

/// Default sub-pattern used to extract a version number from a tag name.
pub const DEFAULT_TAG_VERSION_MATCH: &str = r"\d+\.\d+\.\d+";

/// Version assumed when no release tag exists yet.
pub const INITIAL_VERSION: &str = "0.0.0";

/// Extract the current released version from a most-recent-first tag list.
///
/// Only the first tag is consulted. An empty tag list means nothing has
/// been released and yields [INITIAL_VERSION]. A first tag that does not
/// contain a match for `version_pattern` is fatal: no release calculation
/// can proceed without a determinable current version.
///
/// # Example
/// ```
/// use git_release::domain::tag::{version_from_tags, DEFAULT_TAG_VERSION_MATCH};
/// use regex::Regex;
///
/// let pattern = Regex::new(DEFAULT_TAG_VERSION_MATCH).unwrap();
/// let tags = vec!["v1.0.8".to_string(), "v1.0.7".to_string()];
/// assert_eq!(version_from_tags(&tags, &pattern).unwrap(), "1.0.8");
/// ```
pub fn version_from_tags(tags: &[String], version_pattern: &Regex) -> Result<String> {
    let Some(tag) = tags.first() else {
        return Ok(INITIAL_VERSION.to_string());
    };

    version_pattern
        .find(tag)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            GitReleaseError::tag(format!(
                "Tag '{}' does not contain a version matching '{}'",
                tag,
                version_pattern.as_str()
            ))
        })
}
