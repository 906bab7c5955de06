//! PR, comment and issue text posted by the cascade
//!
//! Downstream tooling greps the originating PR for these strings, so the
//! wording is part of the contract.

/// Body of every PR the cascade opens
pub const PR_BODY: &str =
    "This PR was created automatically by the cascading downstream merge action.";

/// Final comment when every hop merged or was skipped
pub const CASCADE_SUCCEEDED: &str = ":white_check_mark: Auto-merge was successful.";

/// Final comment when any hop stopped its path
pub const CASCADE_FAILED: &str =
    ":bangbang: Auto-merge action did not complete successfully. Please review issues.";

/// Title and body of a tracking issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueText {
    /// Issue title
    pub title: String,
    /// Issue body (markdown)
    pub body: String,
}

/// Title of the PR merging `head` into `base`
pub fn pr_title(head: &str, base: &str) -> String {
    format!("Automatic merge from {head} -> {base}")
}

/// Progress comment after a cascade PR was opened
pub fn pr_created(pr_number: u64, head: &str, base: &str) -> String {
    format!("Created cascading Auto-Merge PR #{pr_number} to merge __{head}__ into __{base}__")
}

/// Comment for a hop skipped because base already contains head
pub fn hop_skipped(head: &str, base: &str) -> String {
    format!(
        "Skipping creation of cascading PR to merge __{head}__ into __{base}__\n\n\
         There are no commits between these branches.\n\n\
         Continuing auto-merge action..."
    )
}

/// Comment for a hop blocked by an already open PR
pub fn pr_already_exists(head: &str, base: &str) -> String {
    format!(
        ":heavy_exclamation_mark: Tried to create a cascading PR to merge __{head}__ into \
         __{base}__ but there is already a pull request open.\n\n\
         Can't continue auto-merge action."
    )
}

/// Issue for an unclassified PR creation failure
pub fn create_failed_issue(head: &str, base: &str, detail: &str) -> IssueText {
    IssueText {
        title: ":heavy_exclamation_mark: Cascading Auto-Merge Failure".to_string(),
        body: format!(
            "Unknown issue when creating a PR to merge __{head}__ into __{base}__\n\n\
             Please try to resolve the issue.\n\n\
             **Cascading Auto-Merge has been stopped!**\n\n\
             Error: \"{detail}\""
        ),
    }
}

/// Comment for an unclassified PR creation failure
pub fn create_failed(head: &str, base: &str, detail: &str, issue_number: u64) -> String {
    format!(
        ":heavy_exclamation_mark: Tried to create a cascading PR to merge __{head}__ into \
         __{base}__ but encountered an issue.\n\n\
         Error: \"{detail}\"\n\n\
         Created an issue #{issue_number}.\n\n\
         Can't continue auto-merge action."
    )
}

/// Issue for a cascade PR that conflicts with its base
pub fn merge_conflict_issue(pr_number: u64, origin_pr: u64) -> IssueText {
    IssueText {
        title: ":heavy_exclamation_mark: Merge Conflict with Cascading Auto-Merge".to_string(),
        body: format!(
            "Issue with cascading auto-merge, please try to resolve the merge conflicts.\n\n\
             PR #{pr_number}.\n\n\
             **Cascading Auto-Merge has been stopped!**\n\n\
             Originating PR #{origin_pr}"
        ),
    }
}

/// Comment for a cascade PR that conflicts with its base
pub fn merge_conflict(pr_number: u64, issue_number: u64) -> String {
    format!(
        ":heavy_exclamation_mark: Could not auto merge PR #{pr_number} due to merge conflicts.\n\n\
         Created an issue #{issue_number}.\n\n\
         Can't continue auto-merge action."
    )
}

/// Issue for an unclassified merge failure
pub fn merge_failed_issue(origin_pr: u64, detail: &str) -> IssueText {
    IssueText {
        title: ":heavy_exclamation_mark: Problem with Cascading Auto-Merge.".to_string(),
        body: format!(
            "Issue with auto-merging a PR.\n\n\
             Please try to resolve the Issue.\n\n\
             **Cascading Auto-Merge has been stopped!**\n\n\
             Originating PR #{origin_pr}\n\n\
             Error: {detail}"
        ),
    }
}

/// Comment for an unclassified merge failure
pub fn merge_failed(
    pr_number: u64,
    head: &str,
    base: &str,
    detail: &str,
    issue_number: u64,
) -> String {
    format!(
        ":heavy_exclamation_mark: Tried merge PR #{pr_number} to merge __{head}__ into __{base}__ \
         but encountered an issue.\n\n\
         Error: \"{detail}\".\n\n\
         Created an issue #{issue_number}.\n\n\
         Can't continue auto-merge action."
    )
}

/// Final status comment for the originating PR
pub const fn final_status(success: bool) -> &'static str {
    if success {
        CASCADE_SUCCEEDED
    } else {
        CASCADE_FAILED
    }
}
