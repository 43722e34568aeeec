//! Domain logic - pure value types independent of git operations

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{CommitRecord, BREAKING_CHANGE_PATTERN, DEFAULT_COMMIT_PATTERN, NO_TYPE};
pub use version::{ReleaseLevel, Version};
