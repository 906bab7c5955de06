//! GitHub token resolution

use super::AuthSource;
use crate::error::{Error, Result};
use tokio::process::Command;
use tracing::debug;

/// Environment variables checked for a token, in order
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// A resolved GitHub token
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// The token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// First non-empty token among `GITHUB_TOKEN` and `GH_TOKEN`
pub fn token_from_env() -> Option<String> {
    TOKEN_ENV_VARS.iter().find_map(|var| {
        std::env::var(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Resolve the token used for PRs, comments and issues
///
/// Order: `explicit` (unless empty), then the environment, then
/// `gh auth token`.
pub async fn get_github_auth(explicit: Option<&str>) -> Result<GitHubAuthConfig> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        debug!("using explicit GitHub token");
        return Ok(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::Explicit,
        });
    }

    if let Some(token) = token_from_env() {
        debug!("using GitHub token from environment");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    debug!("falling back to gh CLI for GitHub token");
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .map_err(|e| Error::Auth(format!("no token provided and gh CLI unavailable: {e}")))?;

    if !output.status.success() {
        return Err(Error::Auth(
            "no token provided and `gh auth token` failed. Set GITHUB_TOKEN or pass --github-token"
                .to_string(),
        ));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(Error::Auth("gh CLI returned an empty token".to_string()));
    }

    Ok(GitHubAuthConfig {
        token,
        source: AuthSource::Cli,
    })
}
