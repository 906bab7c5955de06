//! Run command - cascade a merged PR through the release branches

use crate::cli::CliProgress;
use crate::cli::TokenArgs;
use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, arrow, check};
use anstream::println;
use cascade_merge::cascade::{
    CascadeContext, CascadeOutcome, MergePath, execute_cascade, merge_paths,
};
use cascade_merge::config::{CascadeConfig, CascadeTrigger, ConfigInputs};
use cascade_merge::error::Result;
use cascade_merge::platform::PlatformService;
use std::process::ExitCode;
use tracing::info;

/// Options for the run command
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Dry run - show the merge paths without making changes
    pub dry_run: bool,
    /// Exit non-zero when the cascade did not fully succeed
    pub fail_on_error: bool,
}

/// Run the cascade command
pub async fn run_cascade(
    inputs: ConfigInputs,
    tokens: &TokenArgs,
    options: RunOptions,
) -> Result<ExitCode> {
    // =========================================================================
    // Phase 1: GATHER - config, services, branch list
    // =========================================================================

    let config = match CascadeConfig::resolve(inputs)? {
        CascadeTrigger::Run(config) => config,
        CascadeTrigger::NotMerged { pr_number } => {
            println!(
                "{}",
                format!("PR #{pr_number} was not merged. Skipping cascade.").muted()
            );
            return Ok(ExitCode::SUCCESS);
        }
    };
    info!(
        pr_number = config.pr_number,
        head = %config.head_branch,
        base = %config.base_branch,
        prefixes = ?config.prefixes,
        ref_branch = %config.ref_branch,
        "starting cascade"
    );

    let ctx = CommandContext::new(config, tokens).await?;
    let branches = ctx.platform.list_branches().await?;
    println!(
        "{}",
        format!(
            "Found {} branches on {}.",
            branches.len(),
            ctx.platform.config()
        )
        .muted()
    );

    // =========================================================================
    // Phase 2: ORDER - pure
    // =========================================================================

    let config = &ctx.config;
    let paths = merge_paths(
        &config.prefixes,
        &config.ref_branch,
        &config.head_branch,
        &config.base_branch,
        &branches,
    );

    // =========================================================================
    // Phase 3: EXECUTE - effectful
    // =========================================================================

    if options.dry_run {
        report_dry_run(&paths);
        return Ok(ExitCode::SUCCESS);
    }

    let cascade_ctx = CascadeContext {
        pr_number: config.pr_number,
        actor: config.actor.clone(),
        merge_method: config.merge_method,
    };
    let outcome = execute_cascade(
        &paths,
        &cascade_ctx,
        &ctx.platform,
        ctx.merger(),
        &CliProgress,
    )
    .await?;

    print_summary(&outcome);

    if options.fail_on_error && !outcome.is_success() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn report_dry_run(paths: &[MergePath]) {
    let mut any = false;
    for path in paths.iter().filter(|p| p.hop_count() > 0) {
        any = true;
        println!("{}", "Would cascade:".emphasis());
        for (head, base) in path.hops() {
            println!("  {} {} {}", head.accent(), arrow(), base.accent());
        }
    }
    if !any {
        println!("{}", "Nothing to cascade.".muted());
    }
}

fn print_summary(outcome: &CascadeOutcome) {
    if outcome.is_success() {
        println!(
            "{} Cascade complete: {} merged, {} skipped",
            check(),
            outcome.merged_count(),
            outcome.skipped_count()
        );
        return;
    }

    println!("{}", "Cascade stopped:".warn());
    for failure in outcome.failures() {
        let issue = failure
            .result
            .issue_number()
            .map(|n| format!(" (issue #{n})"))
            .unwrap_or_default();
        println!(
            "  {} {} {}{issue}",
            failure.head.accent(),
            arrow(),
            failure.base.accent()
        );
    }
}
