//! Shared command context for CLI commands
//!
//! Resolves tokens and builds the platform services for a validated config.

use crate::cli::TokenArgs;
use cascade_merge::auth::get_github_auth;
use cascade_merge::config::CascadeConfig;
use cascade_merge::error::Result;
use cascade_merge::platform::{GitHubService, MergeService};
use tracing::{debug, info};

/// Shared context for CLI commands that interact with the platform
pub struct CommandContext {
    /// Validated run configuration
    pub config: CascadeConfig,
    /// Service for branches, PRs, comments and issues
    pub platform: GitHubService,
    /// Separate merge identity, if a merge token was supplied
    merger: Option<GitHubService>,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// The GitHub token is resolved through [`get_github_auth`]. A non-empty
    /// merge token builds a second service used only for merging.
    pub async fn new(config: CascadeConfig, tokens: &TokenArgs) -> Result<Self> {
        let auth = get_github_auth(tokens.github_token.as_deref()).await?;
        info!(source = %auth.source, "resolved GitHub token");

        let platform = GitHubService::new(
            &auth.token,
            config.owner.clone(),
            config.repo.clone(),
            config.api_url.clone(),
        )?;

        let merger = match tokens
            .merge_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            Some(token) => {
                debug!("using separate merge token");
                Some(GitHubService::new(
                    token,
                    config.owner.clone(),
                    config.repo.clone(),
                    config.api_url.clone(),
                )?)
            }
            None => None,
        };

        Ok(Self {
            config,
            platform,
            merger,
        })
    }

    /// The service that merges cascade PRs
    pub fn merger(&self) -> &dyn MergeService {
        self.merger.as_ref().unwrap_or(&self.platform)
    }
}
