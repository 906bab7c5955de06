//! Failure classification for cascade hops
//!
//! GitHub reports the conditions the cascade cares about only through status
//! codes and free-text messages. Every phrase and code the cascade matches on
//! lives here.

use crate::error::Error;

/// Detail message prefix GitHub uses when head and base have no diff
pub const NO_COMMITS_PHRASE: &str = "No commits between";

/// Detail message prefix GitHub uses when an open PR already joins head and base
pub const PR_EXISTS_PHRASE: &str = "A pull request already exists";

/// Status of a rejected PR creation ("Validation Failed")
pub const VALIDATION_FAILED_STATUS: u16 = 422;

/// Status of a rejected merge ("Pull Request is not mergeable")
pub const NOT_MERGEABLE_STATUS: u16 = 405;

/// Why creating a cascade PR failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateFailure {
    /// Base already contains head; the hop is skipped
    NoCommits,
    /// An open PR already exists for this head/base pair
    AlreadyExists,
    /// Anything else
    Other,
}

/// Why merging a cascade PR failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeFailure {
    /// Head and base cannot be merged automatically
    Conflict,
    /// Anything else
    Other,
}

/// Classify an error returned while creating a pull request
pub fn classify_create_failure(err: &Error) -> CreateFailure {
    let Some(api) = err.as_api() else {
        return CreateFailure::Other;
    };
    if api.status != Some(VALIDATION_FAILED_STATUS) {
        return CreateFailure::Other;
    }

    api.detail_messages()
        .find_map(|message| {
            if message.starts_with(NO_COMMITS_PHRASE) {
                Some(CreateFailure::NoCommits)
            } else if message.starts_with(PR_EXISTS_PHRASE) {
                Some(CreateFailure::AlreadyExists)
            } else {
                None
            }
        })
        .unwrap_or(CreateFailure::Other)
}

/// Classify an error returned while merging a pull request
pub fn classify_merge_failure(err: &Error) -> MergeFailure {
    match err.as_api() {
        Some(api) if api.status == Some(NOT_MERGEABLE_STATUS) => MergeFailure::Conflict,
        _ => MergeFailure::Other,
    }
}
