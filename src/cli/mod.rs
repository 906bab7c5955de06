//! CLI commands and argument groups

mod context;
mod progress;
mod run;
mod style;

pub use progress::CliProgress;
pub use run::{RunOptions, run_cascade};

use cascade_merge::config::ConfigInputs;
use cascade_merge::types::MergeMethod;
use clap::Args;
use std::path::PathBuf;

/// Invocation inputs, readable from GitHub Actions environment variables
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Comma-separated branch prefixes, e.g. "release/,hotfix/"
    #[arg(long, env = "INPUT_PREFIXES")]
    pub prefixes: Option<String>,

    /// Trunk branch the cascade ends on
    #[arg(long, env = "INPUT_REF_BRANCH")]
    pub ref_branch: Option<String>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// User who triggered the run; tracking issues are assigned to them
    #[arg(long, env = "GITHUB_ACTOR")]
    pub actor: Option<String>,

    /// API base URL (GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Head branch of the merged PR (default: from the event)
    #[arg(long)]
    pub head: Option<String>,

    /// Base branch of the merged PR (default: from the event)
    #[arg(long)]
    pub base: Option<String>,

    /// Number of the merged PR (default: from the event)
    #[arg(long)]
    pub pr_number: Option<u64>,

    /// Path to the pull_request event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Merge method for cascade PRs
    #[arg(long, value_enum, env = "INPUT_MERGE_METHOD", default_value_t = MergeMethod::Merge)]
    pub merge_method: MergeMethod,
}

impl From<InputArgs> for ConfigInputs {
    fn from(args: InputArgs) -> Self {
        Self {
            prefixes: args.prefixes,
            ref_branch: args.ref_branch,
            repository: args.repository,
            actor: args.actor,
            api_url: args.api_url,
            head_branch: args.head,
            base_branch: args.base,
            pr_number: args.pr_number,
            event_path: args.event_path,
            merge_method: args.merge_method,
        }
    }
}

/// Tokens for the two API identities
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token for creating PRs, comments and issues
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Separate token for merging (default: the GitHub token)
    #[arg(long, env = "INPUT_MERGE_TOKEN", hide_env_values = true)]
    pub merge_token: Option<String>,
}
