//! Shared test helpers

#![allow(dead_code)]

pub mod mock_platform;

pub use mock_platform::MockPlatformService;

use cascade_merge::cascade::MergePath;
use cascade_merge::error::ApiError;

/// A 422 "Validation Failed" error with one detail message
pub fn validation_failed(detail: &str) -> ApiError {
    ApiError::new(Some(422), "Validation Failed").with_detail(detail)
}

/// The error GitHub returns when base already contains head
pub fn no_commits_error(head: &str, base: &str) -> ApiError {
    validation_failed(&format!("No commits between {base} and {head}"))
}

/// The error GitHub returns when an open PR already joins head and base
pub fn pr_exists_error(head: &str) -> ApiError {
    validation_failed(&format!("A pull request already exists for owner:{head}."))
}

/// The error GitHub returns when a PR cannot be merged
pub fn merge_conflict_error() -> ApiError {
    ApiError::new(Some(405), "Pull Request is not mergeable")
}

/// An unclassified server error
pub fn server_error() -> ApiError {
    ApiError::new(Some(500), "Some Unhandled Error").with_detail("Unhandled Exception")
}

/// Build a merge path from branch names
pub fn path(branches: &[&str]) -> MergePath {
    MergePath::new(branches.iter().map(ToString::to_string).collect())
}
