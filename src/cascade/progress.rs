//! Progress reporting for cascade execution

use crate::cascade::execute::HopRecord;
use crate::cascade::order::MergePath;
use async_trait::async_trait;

/// Callback for progress updates while a cascade runs
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A merge path is about to be walked
    async fn on_path_start(&self, path: &MergePath);

    /// A hop finished (merged, skipped or stopped the path)
    async fn on_hop_complete(&self, record: &HopRecord);
}

/// Progress callback that ignores every update
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_path_start(&self, _path: &MergePath) {}

    async fn on_hop_complete(&self, _record: &HopRecord) {}
}
