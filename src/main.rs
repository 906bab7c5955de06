//! cascade-merge CLI

mod cli;

use clap::{Parser, Subcommand};
use cli::{InputArgs, RunOptions, TokenArgs};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Cascade merged pull requests through ordered release branches
#[derive(Parser)]
#[command(name = "cascade-merge", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cascade a merged pull request through every later release branch
    Run {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        tokens: TokenArgs,
        /// Show the merge paths without creating or merging anything
        #[arg(long)]
        dry_run: bool,
        /// Exit non-zero when any hop stopped its merge path
        #[arg(long)]
        fail_on_error: bool,
    },
    /// Show the merge paths for a pull request without changing anything
    Plan {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        tokens: TokenArgs,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cascade_merge=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Run {
            input,
            tokens,
            dry_run,
            fail_on_error,
        } => {
            cli::run_cascade(
                input.into(),
                &tokens,
                RunOptions {
                    dry_run,
                    fail_on_error,
                },
            )
            .await?
        }
        Commands::Plan { input, tokens } => {
            cli::run_cascade(
                input.into(),
                &tokens,
                RunOptions {
                    dry_run: true,
                    fail_on_error: false,
                },
            )
            .await?
        }
    };

    Ok(code)
}
