use std::collections::HashMap;

use regex::Regex;

use crate::analyzer::version_calculator;
use crate::config::Config;
use crate::domain::{tag, CommitRecord};
use crate::error::Result;

/// Outcome of one release analysis.
///
/// Constructed once per [ReleaseAnalyzer::scan] invocation from externally
/// supplied tag and commit text, and never mutated afterwards. Callers hand
/// it to whatever side channel they need; the core keeps no ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCalculationResult {
    pub commits: Vec<CommitRecord>,
    pub current_version: String,
    pub next_version: String,
}

impl ReleaseCalculationResult {
    /// True iff the computed next version is strictly greater than the
    /// current one, i.e. a release is warranted.
    pub fn is_releasable(&self) -> bool {
        version_calculator::compare(&self.next_version, &self.current_version)
    }
}

/// Composes tag extraction, commit parsing and version calculation into
/// one release decision.
pub struct ReleaseAnalyzer {
    pattern: Regex,
    tag_version_match: Regex,
    releases: HashMap<String, String>,
    ignore_scopes: Vec<String>,
}

impl ReleaseAnalyzer {
    /// Build an analyzer from configuration, compiling both patterns.
    ///
    /// An invalid commit or tag-version pattern is a configuration error
    /// and fails here, before any commit is looked at.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(ReleaseAnalyzer {
            pattern: Regex::new(&config.commits.pattern)?,
            tag_version_match: Regex::new(&config.tags.version_match)?,
            releases: config.commits.releases.clone(),
            ignore_scopes: config.commits.ignore_scopes.clone(),
        })
    }

    /// Analyze one release range.
    ///
    /// `tags` is the matching tag list, most recent first; `raw_records`
    /// holds one pipe-delimited record per commit. Commits whose scope is
    /// in the ignore list are dropped entirely: they neither bump the
    /// version nor appear in the changelog.
    pub fn scan(&self, tags: &[String], raw_records: &[String]) -> Result<ReleaseCalculationResult> {
        let current_version = tag::version_from_tags(tags, &self.tag_version_match)?;

        let commits: Vec<CommitRecord> = raw_records
            .iter()
            .map(|line| CommitRecord::parse(line, &self.pattern, &self.releases))
            .filter(|commit| {
                !commit
                    .scope
                    .as_ref()
                    .is_some_and(|scope| self.ignore_scopes.contains(scope))
            })
            .collect();

        let next_version =
            version_calculator::next_version(&current_version, &commits, &self.ignore_scopes);

        Ok(ReleaseCalculationResult {
            commits,
            current_version,
            next_version,
        })
    }
}
