//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::{MergeService, PlatformService};
use crate::types::{Issue, MergeMethod, MergeResult, PlatformConfig, PullRequest};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Page size for branch listing (GitHub's maximum)
const BRANCHES_PER_PAGE: usize = 100;

// REST request/response shapes. Only the fields the cascade reads are
// modelled, so responses from GitHub Enterprise or older API versions still
// deserialize.

#[derive(Serialize)]
struct PageParams {
    per_page: usize,
    page: u32,
}

#[derive(Deserialize)]
struct BranchEntry {
    name: String,
}

#[derive(Serialize)]
struct CreatePullBody<'a> {
    title: &'a str,
    head: &'a str,
    base: &'a str,
    body: &'a str,
}

#[derive(Deserialize)]
struct CreatedPull {
    number: u64,
    #[serde(default)]
    html_url: Option<String>,
}

#[derive(Serialize)]
struct MergeBody {
    merge_method: MergeMethod,
}

#[derive(Deserialize)]
struct MergeResponse {
    #[serde(default)]
    sha: Option<String>,
    #[serde(default)]
    merged: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct CreateIssueBody<'a> {
    title: &'a str,
    body: &'a str,
    assignees: &'a [String],
}

#[derive(Deserialize)]
struct CreatedIssue {
    number: u64,
    #[serde(default)]
    html_url: Option<String>,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

#[derive(Deserialize)]
struct CreatedComment {
    id: u64,
}

/// GitHub service using octocrab
///
/// Implements both [`PlatformService`] and [`MergeService`]; build one
/// instance per token.
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `api_url` overrides the API base URL (GitHub Enterprise, or the
    /// `GITHUB_API_URL` of a runner); `None` talks to api.github.com.
    pub fn new(token: &str, owner: String, repo: String, api_url: Option<String>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(ref url) = api_url {
            builder = builder
                .base_uri(url.as_str())
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            config: PlatformConfig {
                owner,
                repo,
                host: api_url,
            },
        })
    }

    fn repo_route(&self, path: &str) -> String {
        format!("/repos/{}/{}/{path}", self.config.owner, self.config.repo)
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_branches(&self) -> Result<Vec<String>> {
        debug!(repo = %self.config, "listing branches");
        let route = self.repo_route("branches");
        let mut names = Vec::new();

        for page in 1u32.. {
            let params = PageParams {
                per_page: BRANCHES_PER_PAGE,
                page,
            };
            let batch: Vec<BranchEntry> = self.client.get(&route, Some(&params)).await?;
            let count = batch.len();
            names.extend(batch.into_iter().map(|b| b.name));
            if count < BRANCHES_PER_PAGE {
                break;
            }
        }

        debug!(count = names.len(), "listed branches");
        Ok(names)
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        debug!(head, base, "creating PR");
        let request = CreatePullBody {
            title,
            head,
            base,
            body,
        };
        let created: CreatedPull = self
            .client
            .post(self.repo_route("pulls"), Some(&request))
            .await?;

        debug!(pr_number = created.number, "created PR");
        Ok(PullRequest {
            number: created.number,
            html_url: created.html_url.unwrap_or_default(),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
        })
    }

    async fn create_issue(&self, title: &str, body: &str, assignees: &[String]) -> Result<Issue> {
        debug!(?assignees, "creating issue");
        let request = CreateIssueBody {
            title,
            body,
            assignees,
        };
        let created: CreatedIssue = self
            .client
            .post(self.repo_route("issues"), Some(&request))
            .await?;

        debug!(issue_number = created.number, "created issue");
        Ok(Issue {
            number: created.number,
            html_url: created.html_url.unwrap_or_default(),
        })
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        debug!(pr_number, "creating PR comment");
        let comment: CreatedComment = self
            .client
            .post(
                self.repo_route(&format!("issues/{pr_number}/comments")),
                Some(&CommentBody { body }),
            )
            .await?;
        debug!(pr_number, comment_id = comment.id, "created PR comment");
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

#[async_trait]
impl MergeService for GitHubService {
    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        debug!(pr_number, %method, "merging PR");
        let response: MergeResponse = self
            .client
            .put(
                self.repo_route(&format!("pulls/{pr_number}/merge")),
                Some(&MergeBody {
                    merge_method: method,
                }),
            )
            .await?;

        let merge_result = MergeResult {
            merged: response.merged,
            sha: response.sha,
            message: response.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }
}
