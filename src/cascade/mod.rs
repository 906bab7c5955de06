//! Cascade engine
//!
//! Two-phase pattern:
//! 1. Order - derive `MergePath`s from the branch list (pure, testable)
//! 2. Execute - create and merge one PR per hop (effectful)

pub mod classify;
mod execute;
pub mod messages;
mod order;
mod progress;

pub use execute::{CascadeContext, CascadeOutcome, HopRecord, HopResult, execute_cascade};
pub use order::{
    MergePath, TOKEN_SEPARATORS, compare_branches, matching_prefix, merge_paths, order_branches,
    tokenize,
};
pub use progress::{NoopProgress, ProgressCallback};
