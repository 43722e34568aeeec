use std::path::Path;

use git2::{Commit, Oid, Repository as Git2Repo};

use crate::error::{GitReleaseError, Result};
use crate::git::{FIELD_DELIMITER, RECORD_SEPARATOR};

/// Wrapper around git2::Repository implementing the [crate::git::Repository]
/// trait
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository at or above `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn tag_commit_oid(&self, tag_name: &str) -> Result<Oid> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .map_err(|e| GitReleaseError::tag(format!("Cannot find tag '{}': {}", tag_name, e)))?;

        let commit = reference
            .peel_to_commit()
            .map_err(|e| GitReleaseError::tag(format!("Cannot peel tag '{}': {}", tag_name, e)))?;

        Ok(commit.id())
    }

    fn record_for(&self, commit: &Commit) -> String {
        let hash = commit.id().to_string();
        let short_hash = commit
            .as_object()
            .short_id()
            .ok()
            .and_then(|buf| buf.as_str().map(str::to_string))
            .unwrap_or_else(|| hash.chars().take(7).collect());
        let author = commit.author().name().unwrap_or("unknown").to_string();
        let seconds = commit.time().seconds();
        let timestamp = chrono::DateTime::from_timestamp(seconds, 0)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| seconds.to_string());

        // Fields are joined verbatim; delimiter characters inside the
        // message are not escaped, matching the `git log --pretty` stream
        // this mirrors.
        format!(
            "{subject}{d}{body}{d}{hash}{d}{short_hash}{d}{author}{d}{timestamp}{sep}",
            subject = commit.summary().unwrap_or(""),
            body = commit.body().unwrap_or(""),
            d = FIELD_DELIMITER,
            hash = hash,
            short_hash = short_hash,
            author = author,
            timestamp = timestamp,
            sep = RECORD_SEPARATOR,
        )
    }
}

impl super::Repository for Git2Repository {
    fn list_tags_matching(&self, pattern: &str, limit: usize) -> Result<Vec<String>> {
        let names = self.repo.tag_names(Some(pattern))?;

        let mut tags: Vec<(String, i64)> = Vec::new();
        for name in names.iter().flatten() {
            let commit_time = self
                .repo
                .find_reference(&format!("refs/tags/{}", name))
                .and_then(|reference| reference.peel_to_commit())
                .map(|commit| commit.time().seconds())
                .unwrap_or(0);
            tags.push((name.to_string(), commit_time));
        }

        // most recent first
        tags.sort_by(|a, b| b.1.cmp(&a.1));
        tags.truncate(limit);

        Ok(tags.into_iter().map(|(name, _)| name).collect())
    }

    fn commit_log(&self, from: Option<&str>, to: Option<&str>) -> Result<String> {
        let to_oid = match to {
            Some(tag_name) => self.tag_commit_oid(tag_name)?,
            None => self.repo.head()?.peel_to_commit()?.id(),
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(to_oid)?;

        if let Some(tag_name) = from {
            revwalk.hide(self.tag_commit_oid(tag_name)?)?;
        }

        let mut stream = String::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            stream.push_str(&self.record_for(&commit));
            stream.push('\n');
        }

        Ok(stream)
    }
}

// SAFETY: Git2Repository wraps git2::Repository, which is Send but not
// automatically Sync. libgit2 is thread-safe for the read-only operations
// used here, so sharing &Git2Repository across threads is sound.
unsafe impl Sync for Git2Repository {}
