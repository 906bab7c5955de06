//! Authentication for GitHub
//!
//! Supports explicit tokens (action inputs), environment variables and the
//! `gh` CLI.

mod github;

pub use github::{GitHubAuthConfig, get_github_auth, token_from_env};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed explicitly (flag or action input)
    Explicit,
    /// Token from environment variable
    EnvVar,
    /// Token from CLI tool (gh)
    Cli,
}

impl std::fmt::Display for AuthSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit => write!(f, "explicit token"),
            Self::EnvVar => write!(f, "environment"),
            Self::Cli => write!(f, "gh CLI"),
        }
    }
}
