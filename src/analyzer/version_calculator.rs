use crate::domain::{CommitRecord, ReleaseLevel, Version};

/// True iff `a` is strictly greater than `b` under the semantic-version
/// order (major, then minor, then patch).
///
/// Both sides are parsed leniently, so absent or unparsable segments
/// compare as 0. Used both as the release-decision predicate and as a
/// general ordering primitive.
pub fn compare(a: &str, b: &str) -> bool {
    Version::parse_lenient(a) > Version::parse_lenient(b)
}

/// Compute the next version for `current` from classified commits.
///
/// Commits whose scope is listed in `ignore_scopes` are skipped. The
/// highest release level among the remaining commits decides the bump:
/// major dominates minor dominates patch, and exactly one component is
/// bumped with lower components reset. Merge and non-conventional commits
/// carry no release level and never contribute.
pub fn next_version(current: &str, commits: &[CommitRecord], ignore_scopes: &[String]) -> String {
    let highest = commits
        .iter()
        .filter(|commit| {
            !commit
                .scope
                .as_ref()
                .is_some_and(|scope| ignore_scopes.contains(scope))
        })
        .filter_map(|commit| commit.release_level)
        .max()
        .unwrap_or(ReleaseLevel::None);

    Version::parse_lenient(current).bump(highest).to_string()
}
