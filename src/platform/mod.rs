//! Repository-hosting platform services
//!
//! The cascade talks to the hosting API through two capabilities:
//! [`PlatformService`] creates pull requests, comments and issues, while
//! [`MergeService`] merges. Keeping them apart lets a deployment hand merge
//! authority to a different identity than the one opening pull requests.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{Issue, MergeMethod, MergeResult, PlatformConfig, PullRequest};
use async_trait::async_trait;

/// Platform service trait for pull request, comment and issue operations
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List the names of every branch in the repository
    async fn list_branches(&self) -> Result<Vec<String>>;

    /// Create a new pull request merging `head` into `base`
    async fn create_pr(&self, head: &str, base: &str, title: &str, body: &str)
    -> Result<PullRequest>;

    /// Open an issue assigned to `assignees`
    async fn create_issue(&self, title: &str, body: &str, assignees: &[String]) -> Result<Issue>;

    /// Create a comment on a PR
    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}

/// Capability to merge pull requests
#[async_trait]
pub trait MergeService: Send + Sync {
    /// Merge a PR with the specified method
    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult>;
}
