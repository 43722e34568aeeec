//! Git operations abstraction layer
//!
//! Provides a trait-based abstraction over the version-control collaborator,
//! with a real implementation using the `git2` crate and a mock
//! implementation for testing. The core pipeline never talks to git
//! directly; it consumes the tag names and pipe-delimited commit records
//! produced here.
//!
//! # Record stream format
//!
//! Each commit is rendered as one record of up to six `|`-separated fields:
//! subject, body, full hash, short hash, author name, timestamp. Records
//! are terminated by the [RECORD_SEPARATOR] sentinel when concatenated into
//! one stream, mirroring what a `git log --pretty` format string would
//! produce.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Field delimiter within one commit record
pub const FIELD_DELIMITER: char = '|';

/// Multi-character sentinel terminating each record in a stream
pub const RECORD_SEPARATOR: &str = "|>";

/// Split a sentinel-terminated stream into individual commit records.
///
/// Blank fragments (e.g. after the final sentinel) are dropped; leading
/// whitespace inside a record is left for the parser, which trims the
/// subject field itself.
pub fn split_records(stream: &str) -> Vec<String> {
    stream
        .trim()
        .split(RECORD_SEPARATOR)
        .filter(|record| !record.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Common git operation trait for abstraction
///
/// Implementations must be `Send + Sync` so analyses over disjoint
/// repositories can run concurrently.
pub trait Repository: Send + Sync {
    /// Tag names matching a glob pattern, most recent first, at most
    /// `limit` entries.
    fn list_tags_matching(&self, pattern: &str, limit: usize) -> Result<Vec<String>>;

    /// Sentinel-terminated commit record stream for a range.
    ///
    /// Covers commits reachable from `to` (a tag name, or HEAD when
    /// `None`) and not reachable from `from` (a tag name; unbounded when
    /// `None`), newest first.
    fn commit_log(&self, from: Option<&str>, to: Option<&str>) -> Result<String>;
}
