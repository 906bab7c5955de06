//! Terminal progress output for cascade execution

use crate::cli::style::{Stylize, arrow, check, cross};
use anstream::println;
use async_trait::async_trait;
use cascade_merge::cascade::{HopRecord, HopResult, MergePath, ProgressCallback};

/// Prints one line per path and per hop
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_path_start(&self, path: &MergePath) {
        println!(
            "{} {}",
            "Cascading".emphasis(),
            path.branches().join(&format!(" {} ", arrow())).accent()
        );
    }

    async fn on_hop_complete(&self, record: &HopRecord) {
        let hop = format!("{} {} {}", record.head, arrow(), record.base);
        match &record.result {
            HopResult::Merged { pr_number } => {
                println!("  {} {hop}: merged PR #{pr_number}", check());
            }
            HopResult::Skipped => {
                println!("  {} {hop}: {}", "-".muted(), "no commits, skipped".muted());
            }
            HopResult::PrAlreadyExists => {
                println!("  {} {hop}: {}", cross(), "a pull request is already open".warn());
            }
            HopResult::CreateFailed { issue_number } => {
                println!(
                    "  {} {hop}: {}",
                    cross(),
                    format!("could not create PR (issue #{issue_number})").warn()
                );
            }
            HopResult::MergeConflict {
                pr_number,
                issue_number,
            } => {
                println!(
                    "  {} {hop}: {}",
                    cross(),
                    format!("PR #{pr_number} has merge conflicts (issue #{issue_number})").warn()
                );
            }
            HopResult::MergeFailed {
                pr_number,
                issue_number,
            } => {
                println!(
                    "  {} {hop}: {}",
                    cross(),
                    format!("could not merge PR #{pr_number} (issue #{issue_number})").warn()
                );
            }
        }
    }
}
