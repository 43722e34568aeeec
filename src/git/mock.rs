use crate::error::Result;
use crate::git::{Repository, RECORD_SEPARATOR};

/// Mock repository for testing without actual git operations
///
/// Tags and the record stream are supplied up front; the glob pattern and
/// range arguments are accepted but not interpreted.
#[derive(Default)]
pub struct MockRepository {
    tags: Vec<String>,
    stream: String,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository::default()
    }

    /// Add a tag. Tags are returned in insertion order, so add the
    /// newest tag first.
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Append one pipe-delimited commit record to the stream
    pub fn add_record(&mut self, record: impl Into<String>) {
        self.stream.push_str(&record.into());
        self.stream.push_str(RECORD_SEPARATOR);
        self.stream.push('\n');
    }
}

impl Repository for MockRepository {
    fn list_tags_matching(&self, _pattern: &str, limit: usize) -> Result<Vec<String>> {
        Ok(self.tags.iter().take(limit).cloned().collect())
    }

    fn commit_log(&self, _from: Option<&str>, _to: Option<&str>) -> Result<String> {
        Ok(self.stream.clone())
    }
}
