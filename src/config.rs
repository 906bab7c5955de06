//! Invocation configuration
//!
//! A cascade run is described by the action inputs (`INPUT_*`), the runner
//! environment (`GITHUB_REPOSITORY`, `GITHUB_ACTOR`, `GITHUB_API_URL`) and
//! the `pull_request` event payload. The CLI collects the raw values into
//! [`ConfigInputs`]; [`CascadeConfig::resolve`] validates them.

use crate::error::{Error, Result};
use crate::types::MergeMethod;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// API URL of github.com; treated as "no custom host"
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Raw, unvalidated configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigInputs {
    /// Comma-separated branch prefixes (e.g. `release/,hotfix/`)
    pub prefixes: Option<String>,
    /// Trunk branch the base-side cascade ends on
    pub ref_branch: Option<String>,
    /// Repository as `owner/repo`
    pub repository: Option<String>,
    /// User who triggered the run
    pub actor: Option<String>,
    /// API base URL
    pub api_url: Option<String>,
    /// Head branch of the merged PR (overrides the event)
    pub head_branch: Option<String>,
    /// Base branch of the merged PR (overrides the event)
    pub base_branch: Option<String>,
    /// Number of the merged PR (overrides the event)
    pub pr_number: Option<u64>,
    /// Path to the webhook event JSON
    pub event_path: Option<PathBuf>,
    /// Merge method for cascade PRs
    pub merge_method: MergeMethod,
}

/// Validated configuration for one cascade run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeConfig {
    /// Branch prefixes that select release series
    pub prefixes: Vec<String>,
    /// Trunk branch
    pub ref_branch: String,
    /// Head branch of the merged PR
    pub head_branch: String,
    /// Base branch of the merged PR
    pub base_branch: String,
    /// Number of the merged PR
    pub pr_number: u64,
    /// User who triggered the run (empty if unknown)
    pub actor: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom API base URL
    pub api_url: Option<String>,
    /// Merge method for cascade PRs
    pub merge_method: MergeMethod,
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeTrigger {
    /// The PR was merged; cascade it
    Run(CascadeConfig),
    /// The PR was closed without merging; nothing to do
    NotMerged {
        /// Number of the closed PR
        pr_number: u64,
    },
}

/// The parts of a `pull_request` webhook payload the cascade reads
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    /// The pull request, absent for other event types
    pub pull_request: Option<EventPullRequest>,
}

/// Pull request object of a webhook payload
#[derive(Debug, Clone, Deserialize)]
pub struct EventPullRequest {
    /// PR number
    pub number: u64,
    /// Whether the PR was merged
    #[serde(default)]
    pub merged: bool,
    /// Head branch
    pub head: EventRef,
    /// Base branch
    pub base: EventRef,
}

/// Branch reference of a webhook payload
#[derive(Debug, Clone, Deserialize)]
pub struct EventRef {
    /// Branch name
    #[serde(rename = "ref")]
    pub ref_name: String,
}

/// Split a comma-separated prefix list
///
/// Whitespace around entries is trimmed and empty entries are dropped.
pub fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Split `owner/repo`
pub fn parse_repository(raw: &str) -> Result<(String, String)> {
    match raw.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Config(format!(
            "invalid repository '{raw}', expected owner/repo"
        ))),
    }
}

/// Validate an API base URL
///
/// Returns `None` for github.com's API, the URL without a trailing slash
/// otherwise.
pub fn normalize_api_url(raw: &str) -> Result<Option<String>> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("invalid API URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "invalid API URL '{raw}': unsupported scheme {}",
            url.scheme()
        )));
    }

    let normalized = url.as_str().trim_end_matches('/').to_string();
    if normalized == DEFAULT_API_URL {
        Ok(None)
    } else {
        Ok(Some(normalized))
    }
}

/// Load a webhook event payload from disk
pub fn load_event(path: &Path) -> Result<PullRequestEvent> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("failed to read event {}: {e}", path.display()))
    })?;
    let event: PullRequestEvent = serde_json::from_str(&content)?;
    Ok(event)
}

fn required(value: Option<String>, what: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Config(format!("missing {what}")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CascadeConfig {
    /// Validate raw inputs
    ///
    /// Explicit head/base/PR number take precedence over the event payload;
    /// the event is only read when one of them is missing. A payload for an
    /// unmerged PR yields [`CascadeTrigger::NotMerged`].
    pub fn resolve(inputs: ConfigInputs) -> Result<CascadeTrigger> {
        let prefixes = parse_prefixes(&required(inputs.prefixes, "prefixes")?);
        if prefixes.is_empty() {
            return Err(Error::Config("prefixes must name at least one prefix".to_string()));
        }
        let ref_branch = required(inputs.ref_branch, "ref branch")?;
        let (owner, repo) = parse_repository(&required(inputs.repository, "repository")?)?;
        let api_url = match non_empty(inputs.api_url) {
            Some(raw) => normalize_api_url(&raw)?,
            None => None,
        };
        let actor = non_empty(inputs.actor).unwrap_or_default();

        let mut head_branch = non_empty(inputs.head_branch);
        let mut base_branch = non_empty(inputs.base_branch);
        let mut pr_number = inputs.pr_number;

        if head_branch.is_none() || base_branch.is_none() || pr_number.is_none() {
            let path = inputs.event_path.ok_or_else(|| {
                Error::Config(
                    "missing pull request details: pass --head, --base and --pr-number or an event file"
                        .to_string(),
                )
            })?;
            let event = load_event(&path)?;
            let pr = event.pull_request.ok_or_else(|| {
                Error::Config(format!(
                    "event {} has no pull_request; run on pull_request events",
                    path.display()
                ))
            })?;
            debug!(pr_number = pr.number, merged = pr.merged, "loaded event payload");

            if !pr.merged {
                return Ok(CascadeTrigger::NotMerged {
                    pr_number: pr_number.unwrap_or(pr.number),
                });
            }
            head_branch = head_branch.or(Some(pr.head.ref_name));
            base_branch = base_branch.or(Some(pr.base.ref_name));
            pr_number = pr_number.or(Some(pr.number));
        }

        Ok(CascadeTrigger::Run(Self {
            prefixes,
            ref_branch,
            head_branch: required(head_branch, "head branch")?,
            base_branch: required(base_branch, "base branch")?,
            pr_number: pr_number.ok_or_else(|| Error::Config("missing PR number".to_string()))?,
            actor,
            owner,
            repo,
            api_url,
            merge_method: inputs.merge_method,
        }))
    }
}
