//! Cascade execution - effectful operations
//!
//! Walks the merge paths produced by the ordering functions, one hop at a
//! time: create a PR from `head` into `base`, then merge it. Every hop is
//! awaited before the next starts, since a hop's PR only has commits once the
//! previous merge has landed.
//!
//! Per hop:
//! - create ok, merge ok: continue
//! - create failed with "no commits": comment, skip the hop, continue
//! - any other failure: comment (plus an issue where a human must act),
//!   abandon the rest of the path, mark the cascade failed
//!
//! One final status comment is posted on the originating PR after all paths.

use crate::cascade::classify::{
    CreateFailure, MergeFailure, classify_create_failure, classify_merge_failure,
};
use crate::cascade::messages;
use crate::cascade::order::MergePath;
use crate::cascade::progress::ProgressCallback;
use crate::error::{Error, Result};
use crate::platform::{MergeService, PlatformService};
use crate::types::MergeMethod;
use tracing::{info, warn};

/// Invocation parameters shared by every hop
#[derive(Debug, Clone)]
pub struct CascadeContext {
    /// The merged PR that triggered the cascade; receives all comments
    pub pr_number: u64,
    /// User who triggered the run; tracking issues are assigned to them
    pub actor: String,
    /// Merge method for cascade PRs
    pub merge_method: MergeMethod,
}

impl CascadeContext {
    fn assignees(&self) -> Vec<String> {
        if self.actor.is_empty() {
            Vec::new()
        } else {
            vec![self.actor.clone()]
        }
    }
}

/// How a single hop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HopResult {
    /// PR created and merged
    Merged {
        /// The cascade PR
        pr_number: u64,
    },
    /// Nothing to merge; no PR was created
    Skipped,
    /// An open PR already joins head and base
    PrAlreadyExists,
    /// PR creation failed for an unclassified reason
    CreateFailed {
        /// Tracking issue opened for the failure
        issue_number: u64,
    },
    /// The cascade PR conflicts with its base
    MergeConflict {
        /// The cascade PR
        pr_number: u64,
        /// Tracking issue opened for the conflict
        issue_number: u64,
    },
    /// Merging failed for an unclassified reason
    MergeFailed {
        /// The cascade PR
        pr_number: u64,
        /// Tracking issue opened for the failure
        issue_number: u64,
    },
}

impl HopResult {
    /// Whether this result stops the rest of its path
    pub const fn aborts_path(&self) -> bool {
        !matches!(self, Self::Merged { .. } | Self::Skipped)
    }

    /// Tracking issue opened for this hop, if any
    pub const fn issue_number(&self) -> Option<u64> {
        match self {
            Self::CreateFailed { issue_number }
            | Self::MergeConflict { issue_number, .. }
            | Self::MergeFailed { issue_number, .. } => Some(*issue_number),
            Self::Merged { .. } | Self::Skipped | Self::PrAlreadyExists => None,
        }
    }
}

/// One hop of a path and how it ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopRecord {
    /// Branch merged from
    pub head: String,
    /// Branch merged into
    pub base: String,
    /// Outcome of the hop
    pub result: HopResult,
}

/// Result of cascade execution
#[derive(Debug, Clone)]
pub struct CascadeOutcome {
    overall_success: bool,
    /// Every hop attempted, in execution order
    pub hops: Vec<HopRecord>,
}

impl Default for CascadeOutcome {
    fn default() -> Self {
        Self {
            overall_success: true,
            hops: Vec::new(),
        }
    }
}

impl CascadeOutcome {
    /// Check if every hop merged or was skipped
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.overall_success
    }

    /// Number of hops that merged a PR
    #[must_use]
    pub fn merged_count(&self) -> usize {
        self.hops
            .iter()
            .filter(|h| matches!(h.result, HopResult::Merged { .. }))
            .count()
    }

    /// Number of hops skipped for having no commits
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.hops
            .iter()
            .filter(|h| h.result == HopResult::Skipped)
            .count()
    }

    /// Hops that stopped their path
    pub fn failures(&self) -> impl Iterator<Item = &HopRecord> {
        self.hops.iter().filter(|h| h.result.aborts_path())
    }

    fn record(&mut self, record: HopRecord) {
        // Never reset once cleared
        if record.result.aborts_path() {
            self.overall_success = false;
        }
        self.hops.push(record);
    }
}

/// Execute the cascade (EFFECTFUL)
///
/// Walks `paths` in order through `platform` (PR creation, comments, issues)
/// and `merger` (merges). Hop failures are reported on the originating PR and
/// folded into the returned [`CascadeOutcome`]; they are not returned as
/// errors. An `Err` means the bookkeeping itself failed, e.g. a comment could
/// not be posted. The cascade then stops, but the failure marker is still
/// posted on the originating PR before the error is returned.
///
/// # Arguments
/// * `paths` - Merge paths, walked in order
/// * `ctx` - Originating PR, actor and merge method
/// * `platform` - Service for PRs, comments and issues
/// * `merger` - Service for merging; may be the same object as `platform`
/// * `progress` - Progress callback for status updates
pub async fn execute_cascade(
    paths: &[MergePath],
    ctx: &CascadeContext,
    platform: &dyn PlatformService,
    merger: &dyn MergeService,
    progress: &dyn ProgressCallback,
) -> Result<CascadeOutcome> {
    let mut outcome = CascadeOutcome::default();
    let mut bookkeeping_error = None;

    'paths: for path in paths {
        if path.hop_count() == 0 {
            continue;
        }
        info!(%path, "walking merge path");
        progress.on_path_start(path).await;

        for (head, base) in path.hops() {
            let result = match run_hop(head, base, ctx, platform, merger).await {
                Ok(result) => result,
                Err(err) => {
                    warn!(head, base, error = %err, "cascade bookkeeping failed, stopping");
                    outcome.overall_success = false;
                    bookkeeping_error = Some(err);
                    break 'paths;
                }
            };
            let record = HopRecord {
                head: head.to_string(),
                base: base.to_string(),
                result,
            };
            progress.on_hop_complete(&record).await;

            let aborted = record.result.aborts_path();
            outcome.record(record);
            if aborted {
                warn!(head, base, "stopping merge path");
                break;
            }
        }
    }

    let posted = platform
        .create_pr_comment(ctx.pr_number, messages::final_status(outcome.is_success()))
        .await;

    if let Some(err) = bookkeeping_error {
        if let Err(final_err) = posted {
            warn!(error = %final_err, "failed to post final status comment");
        }
        return Err(err);
    }
    posted?;

    info!(
        success = outcome.is_success(),
        merged = outcome.merged_count(),
        skipped = outcome.skipped_count(),
        "cascade finished"
    );
    Ok(outcome)
}

async fn run_hop(
    head: &str,
    base: &str,
    ctx: &CascadeContext,
    platform: &dyn PlatformService,
    merger: &dyn MergeService,
) -> Result<HopResult> {
    let title = messages::pr_title(head, base);
    let pr = match platform
        .create_pr(head, base, &title, messages::PR_BODY)
        .await
    {
        Ok(pr) => pr,
        Err(err) => return handle_create_failure(&err, head, base, ctx, platform).await,
    };

    info!(head, base, pr_number = pr.number, "created cascade PR");
    platform
        .create_pr_comment(ctx.pr_number, &messages::pr_created(pr.number, head, base))
        .await?;

    match merger.merge_pr(pr.number, ctx.merge_method).await {
        Ok(result) if result.merged => {
            info!(pr_number = pr.number, sha = ?result.sha, "merged cascade PR");
            Ok(HopResult::Merged {
                pr_number: pr.number,
            })
        }
        Ok(result) => {
            // Merge API answered but didn't merge
            let detail = serde_json::json!({
                "message": result.message.unwrap_or_else(|| "Pull request was not merged".to_string()),
            })
            .to_string();
            handle_merge_failure(MergeFailure::Other, &detail, pr.number, head, base, ctx, platform)
                .await
        }
        Err(err) => {
            warn!(pr_number = pr.number, error = %err, "merge failed");
            handle_merge_failure(
                classify_merge_failure(&err),
                &err.detail(),
                pr.number,
                head,
                base,
                ctx,
                platform,
            )
            .await
        }
    }
}

async fn handle_create_failure(
    err: &Error,
    head: &str,
    base: &str,
    ctx: &CascadeContext,
    platform: &dyn PlatformService,
) -> Result<HopResult> {
    match classify_create_failure(err) {
        CreateFailure::NoCommits => {
            info!(head, base, "no commits between branches, skipping hop");
            platform
                .create_pr_comment(ctx.pr_number, &messages::hop_skipped(head, base))
                .await?;
            Ok(HopResult::Skipped)
        }
        CreateFailure::AlreadyExists => {
            warn!(head, base, "a pull request already exists");
            platform
                .create_pr_comment(ctx.pr_number, &messages::pr_already_exists(head, base))
                .await?;
            Ok(HopResult::PrAlreadyExists)
        }
        CreateFailure::Other => {
            warn!(head, base, error = %err, "failed to create cascade PR");
            let detail = err.detail();
            let issue_text = messages::create_failed_issue(head, base, &detail);
            let issue = platform
                .create_issue(&issue_text.title, &issue_text.body, &ctx.assignees())
                .await?;
            platform
                .create_pr_comment(
                    ctx.pr_number,
                    &messages::create_failed(head, base, &detail, issue.number),
                )
                .await?;
            Ok(HopResult::CreateFailed {
                issue_number: issue.number,
            })
        }
    }
}

async fn handle_merge_failure(
    failure: MergeFailure,
    detail: &str,
    pr_number: u64,
    head: &str,
    base: &str,
    ctx: &CascadeContext,
    platform: &dyn PlatformService,
) -> Result<HopResult> {
    let assignees = ctx.assignees();
    match failure {
        MergeFailure::Conflict => {
            let issue_text = messages::merge_conflict_issue(pr_number, ctx.pr_number);
            let issue = platform
                .create_issue(&issue_text.title, &issue_text.body, &assignees)
                .await?;
            platform
                .create_pr_comment(
                    ctx.pr_number,
                    &messages::merge_conflict(pr_number, issue.number),
                )
                .await?;
            Ok(HopResult::MergeConflict {
                pr_number,
                issue_number: issue.number,
            })
        }
        MergeFailure::Other => {
            let issue_text = messages::merge_failed_issue(ctx.pr_number, detail);
            let issue = platform
                .create_issue(&issue_text.title, &issue_text.body, &assignees)
                .await?;
            platform
                .create_pr_comment(
                    ctx.pr_number,
                    &messages::merge_failed(pr_number, head, base, detail, issue.number),
                )
                .await?;
            Ok(HopResult::MergeFailed {
                pr_number,
                issue_number: issue.number,
            })
        }
    }
}
