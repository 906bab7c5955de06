//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use cascade_merge::error::{ApiError, Error, Result};
use cascade_merge::platform::{MergeService, PlatformService};
use cascade_merge::types::{Issue, MergeMethod, MergeResult, PlatformConfig, PullRequest};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
}

/// Call record for `create_issue`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssueCall {
    pub title: String,
    pub body: String,
    pub assignees: Vec<String>,
}

/// Call record for `create_pr_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentCall {
    pub pr_number: u64,
    pub body: String,
}

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub method: MergeMethod,
}

/// Simple mock platform service for testing
///
/// Implements both `PlatformService` and `MergeService` so the same mock can
/// play one or both identities.
///
/// Features:
/// - Auto-incrementing PR and issue numbers
/// - Call tracking for verification
/// - Error injection, globally or per head/base pair, one-shot or sticky
pub struct MockPlatformService {
    config: PlatformConfig,
    branches: Mutex<Vec<String>>,
    next_pr_number: AtomicU64,
    next_issue_number: AtomicU64,
    // Call tracking
    list_branches_calls: AtomicU64,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    create_issue_calls: Mutex<Vec<CreateIssueCall>>,
    create_comment_calls: Mutex<Vec<CreateCommentCall>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    error_on_create_pr: Mutex<Option<ApiError>>,
    create_pr_errors_for: Mutex<HashMap<(String, String), VecDeque<ApiError>>>,
    error_on_merge_pr: Mutex<Option<ApiError>>,
    merge_responses: Mutex<HashMap<u64, MergeResult>>,
    error_on_comment: Mutex<Option<ApiError>>,
    error_on_issue: Mutex<Option<ApiError>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            branches: Mutex::new(Vec::new()),
            next_pr_number: AtomicU64::new(100),
            next_issue_number: AtomicU64::new(500),
            list_branches_calls: AtomicU64::new(0),
            create_pr_calls: Mutex::new(Vec::new()),
            create_issue_calls: Mutex::new(Vec::new()),
            create_comment_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            error_on_create_pr: Mutex::new(None),
            create_pr_errors_for: Mutex::new(HashMap::new()),
            error_on_merge_pr: Mutex::new(None),
            merge_responses: Mutex::new(HashMap::new()),
            error_on_comment: Mutex::new(None),
            error_on_issue: Mutex::new(None),
        }
    }

    /// Create a mock for `owner/repo`
    pub fn new() -> Self {
        Self::with_config(PlatformConfig::new("owner", "repo"))
    }

    /// Set the branches returned by `list_branches`
    pub fn set_branches(&self, branches: &[&str]) {
        *self.branches.lock().unwrap() = branches.iter().map(ToString::to_string).collect();
    }

    // === Error injection methods ===

    /// Make every `create_pr` call fail
    pub fn fail_create_pr(&self, err: ApiError) {
        *self.error_on_create_pr.lock().unwrap() = Some(err);
    }

    /// Make the next `create_pr(head, base)` call fail; later calls succeed
    pub fn fail_create_pr_once(&self, head: &str, base: &str, err: ApiError) {
        self.create_pr_errors_for
            .lock()
            .unwrap()
            .entry((head.to_string(), base.to_string()))
            .or_default()
            .push_back(err);
    }

    /// Make every `merge_pr` call fail
    pub fn fail_merge_pr(&self, err: ApiError) {
        *self.error_on_merge_pr.lock().unwrap() = Some(err);
    }

    /// Set the response for `merge_pr` for a specific PR
    pub fn set_merge_response(&self, pr_number: u64, result: MergeResult) {
        self.merge_responses
            .lock()
            .unwrap()
            .insert(pr_number, result);
    }

    /// Make every `create_pr_comment` call fail
    pub fn fail_comments(&self, err: ApiError) {
        *self.error_on_comment.lock().unwrap() = Some(err);
    }

    /// Make every `create_issue` call fail
    pub fn fail_issues(&self, err: ApiError) {
        *self.error_on_issue.lock().unwrap() = Some(err);
    }

    // === Call verification methods ===

    /// Number of `list_branches` calls
    pub fn list_branches_call_count(&self) -> u64 {
        self.list_branches_calls.load(Ordering::SeqCst)
    }

    /// Get all `create_pr` calls
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Get all `create_issue` calls
    pub fn get_create_issue_calls(&self) -> Vec<CreateIssueCall> {
        self.create_issue_calls.lock().unwrap().clone()
    }

    /// Get all `create_pr_comment` calls
    pub fn get_create_comment_calls(&self) -> Vec<CreateCommentCall> {
        self.create_comment_calls.lock().unwrap().clone()
    }

    /// Bodies of all comments, in order
    pub fn comment_bodies(&self) -> Vec<String> {
        self.get_create_comment_calls()
            .into_iter()
            .map(|c| c.body)
            .collect()
    }

    /// Get all `merge_pr` calls
    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    /// `(head, base)` of every `create_pr` call, in order
    pub fn created_pairs(&self) -> Vec<(String, String)> {
        self.get_create_pr_calls()
            .into_iter()
            .map(|c| (c.head, c.base))
            .collect()
    }

    /// Assert that `create_pr` was called with specific head and base
    pub fn assert_create_pr_called(&self, head: &str, base: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "Expected create_pr({head}, {base}) but got: {calls:?}"
        );
    }

    /// Assert that some comment contains `needle`
    pub fn assert_comment_contains(&self, needle: &str) {
        let bodies = self.comment_bodies();
        assert!(
            bodies.iter().any(|b| b.contains(needle)),
            "Expected a comment containing {needle:?} but got: {bodies:?}"
        );
    }

    /// Assert that `merge_pr` was called for a specific PR
    pub fn assert_merge_called(&self, pr_number: u64) {
        let calls = self.get_merge_pr_calls();
        assert!(
            calls.iter().any(|c| c.pr_number == pr_number),
            "Expected merge_pr({pr_number}) but got: {calls:?}"
        );
    }

    /// Get count of merge_pr calls
    pub fn merge_call_count(&self) -> usize {
        self.merge_pr_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_branches(&self) -> Result<Vec<String>> {
        self.list_branches_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.branches.lock().unwrap().clone())
    }

    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });

        // Check for injected error
        if let Some(err) = self
            .create_pr_errors_for
            .lock()
            .unwrap()
            .get_mut(&(head.to_string(), base.to_string()))
            .and_then(VecDeque::pop_front)
        {
            return Err(Error::Api(err));
        }
        if let Some(err) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::Api(err.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/owner/repo/pull/{number}"),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
        })
    }

    async fn create_issue(&self, title: &str, body: &str, assignees: &[String]) -> Result<Issue> {
        self.create_issue_calls.lock().unwrap().push(CreateIssueCall {
            title: title.to_string(),
            body: body.to_string(),
            assignees: assignees.to_vec(),
        });

        if let Some(err) = self.error_on_issue.lock().unwrap().as_ref() {
            return Err(Error::Api(err.clone()));
        }

        let number = self.next_issue_number.fetch_add(1, Ordering::SeqCst);
        Ok(Issue {
            number,
            html_url: format!("https://github.com/owner/repo/issues/{number}"),
        })
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        self.create_comment_calls
            .lock()
            .unwrap()
            .push(CreateCommentCall {
                pr_number,
                body: body.to_string(),
            });

        if let Some(err) = self.error_on_comment.lock().unwrap().as_ref() {
            return Err(Error::Api(err.clone()));
        }
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

#[async_trait]
impl MergeService for MockPlatformService {
    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        self.merge_pr_calls
            .lock()
            .unwrap()
            .push(MergePrCall { pr_number, method });

        // Check for injected error
        if let Some(err) = self.error_on_merge_pr.lock().unwrap().as_ref() {
            return Err(Error::Api(err.clone()));
        }

        let responses = self.merge_responses.lock().unwrap();
        Ok(responses.get(&pr_number).cloned().unwrap_or_else(|| MergeResult {
            merged: true,
            sha: Some(format!("merged_sha_{pr_number}")),
            message: None,
        }))
    }
}
