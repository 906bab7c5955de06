//! cascade-merge: cascading merges across ordered release branches
//!
//! When a pull request lands on one branch of a release sequence
//! (`release/1.0`, `release/1.2`, ...), this crate opens and merges a pull
//! request for every later branch in turn, finishing on the trunk branch.
//!
//! The crate is split the same way the cascade runs:
//! - [`cascade::merge_paths`] derives the merge paths (pure, no I/O)
//! - [`cascade::execute_cascade`] walks them against a [`platform::PlatformService`]
//!   and a [`platform::MergeService`] (effectful)

pub mod auth;
pub mod cascade;
pub mod config;
pub mod error;
pub mod platform;
pub mod types;
