use std::collections::HashMap;

use regex::Regex;

use crate::domain::ReleaseLevel;

/// Default subject pattern for conventional commits.
///
/// Exactly four capture groups, in order: type, scope (optional),
/// breaking-change marker (optional `!`), description.
pub const DEFAULT_COMMIT_PATTERN: &str =
    r"^(build|docs|fix|feat|chore|style|refactor|perf|test)(?:\(([^)]+)\))?(!?): (.*)";

/// Body pattern that marks a breaking change, singular or plural.
/// Case-sensitive, first match wins.
pub const BREAKING_CHANGE_PATTERN: &str = r"BREAKING CHANGES?: (.*)";

/// Type assigned to commits whose subject does not match the pattern.
pub const NO_TYPE: &str = "no_type";

/// Structured classification of one raw commit record.
///
/// Produced once per pipe-delimited input line and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Subject line as taken from the record, trimmed
    pub raw_subject: String,
    pub body: Option<String>,
    pub hash: Option<String>,
    pub short_hash: Option<String>,
    pub author: Option<String>,
    /// Opaque timestamp, not parsed further
    pub date: Option<String>,
    /// True iff the subject matched the commit-format pattern
    pub is_valid: bool,
    pub r#type: String,
    pub scope: Option<String>,
    /// Description captured from the pattern, or the raw subject when invalid
    pub subject: String,
    pub is_merge: bool,
    pub is_breaking_change: bool,
    /// Text captured from a `BREAKING CHANGE:` body line, if any
    pub breaking_change: Option<String>,
    /// Absent when the subject did not match the pattern
    pub release_level: Option<ReleaseLevel>,
}

impl CommitRecord {
    /// Parse one pipe-delimited commit record.
    ///
    /// The record carries 2 to 6 fields: subject, body, full hash, short
    /// hash, author name, timestamp. Trailing fields may be absent; empty
    /// fields are treated as absent.
    ///
    /// `pattern` must expose the four capture groups documented on
    /// [DEFAULT_COMMIT_PATTERN]. `releases` maps type tokens to release
    /// level names (`"patch"`, `"minor"`, ...); recognized types without a
    /// mapping classify as [ReleaseLevel::None].
    ///
    /// A non-matching subject is not an error: the record is kept with
    /// type `no_type`, the raw subject as its description, and no release
    /// level, so it can still surface in a catch-all changelog section.
    pub fn parse(line: &str, pattern: &Regex, releases: &HashMap<String, String>) -> Self {
        let mut fields = line.split('|');

        let raw_subject = fields.next().unwrap_or("").trim().to_string();
        let body = next_field(&mut fields);
        let hash = next_field(&mut fields);
        let short_hash = next_field(&mut fields);
        let author = next_field(&mut fields);
        let date = next_field(&mut fields);

        let is_merge = raw_subject.starts_with("Merge");

        let Some(captures) = pattern.captures(&raw_subject) else {
            return CommitRecord {
                subject: raw_subject.clone(),
                raw_subject,
                body,
                hash,
                short_hash,
                author,
                date,
                is_valid: false,
                r#type: NO_TYPE.to_string(),
                scope: None,
                is_merge,
                is_breaking_change: false,
                breaking_change: None,
                release_level: None,
            };
        };

        let r#type = captures
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let scope = captures
            .get(2)
            .map(|m| m.as_str().to_string())
            .filter(|s| !s.is_empty());
        let exclamation_marker = captures.get(3).is_some_and(|m| m.as_str() == "!");
        let subject = captures
            .get(4)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        // Empty and absent bodies alike carry no breaking-change text.
        let breaking_change = body.as_deref().and_then(|b| {
            Regex::new(BREAKING_CHANGE_PATTERN)
                .ok()
                .and_then(|re| re.captures(b))
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        });

        let is_breaking_change = exclamation_marker || breaking_change.is_some();

        let mut release_level = releases
            .get(&r#type)
            .and_then(|name| name.parse::<ReleaseLevel>().ok())
            .unwrap_or(ReleaseLevel::None);
        if is_breaking_change {
            release_level = ReleaseLevel::Major;
        }

        CommitRecord {
            raw_subject,
            body,
            hash,
            short_hash,
            author,
            date,
            is_valid: true,
            r#type,
            scope,
            subject,
            is_merge,
            is_breaking_change,
            breaking_change,
            release_level: Some(release_level),
        }
    }

    /// Rebuild the pipe-delimited record line this record was parsed from.
    pub fn to_record_line(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}",
            self.raw_subject,
            self.body.as_deref().unwrap_or(""),
            self.hash.as_deref().unwrap_or(""),
            self.short_hash.as_deref().unwrap_or(""),
            self.author.as_deref().unwrap_or(""),
            self.date.as_deref().unwrap_or("")
        )
    }
}

fn next_field<'a>(fields: &mut impl Iterator<Item = &'a str>) -> Option<String> {
    fields
        .next()
        .map(str::to_string)
        .filter(|f| !f.is_empty())
}

/// Default `type -> release level` mapping: fixes bump patch, features
/// bump minor, everything else is left to the breaking-change override.
pub fn default_releases() -> HashMap<String, String> {
    HashMap::from([
        ("fix".to_string(), "patch".to_string()),
        ("feat".to_string(), "minor".to_string()),
    ])
}
